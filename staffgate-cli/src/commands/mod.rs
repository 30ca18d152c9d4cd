pub mod check;
pub mod inspect;

use serde::Serialize;

/// Command result, printable as text or JSON
pub trait Report: Serialize {
    /// Whether the command should exit successfully
    fn passed(&self) -> bool;

    fn human(&self) -> String;
}

/// Print a report and return its pass/fail status
pub fn emit<R: Report>(report: &R, json: bool) -> anyhow::Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.human());
    }
    Ok(report.passed())
}
