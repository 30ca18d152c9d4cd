//! Staffgate CLI: inspect and validate access policies.
//!
//! ```bash
//! staffgate check-permission --role hr --module employees --action delete
//! staffgate guard --role employee --path /hr/leaves
//! staffgate --config staffgate.toml validate
//! ```
//!
//! Exit status is 0 when the decision allows (or the policy is valid), 1 when
//! it denies, 2 on usage or configuration errors.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use staffgate_core::config::{StaffgateConfig, DEFAULT_CONFIG_FILE};
use staffgate_core::logging::init_logging;
use staffgate_core::{AccessPolicy, Role};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "staffgate",
    about = "Inspect and validate Staffgate access policies",
    version
)]
struct Cli {
    /// Configuration file (default: ./staffgate.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a role holds a module action
    CheckPermission {
        #[arg(long)]
        role: Role,
        #[arg(long)]
        module: String,
        #[arg(long)]
        action: String,
    },

    /// Check whether a role may open a path
    CheckRoute {
        /// Omit for a caller without a role
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        path: String,
    },

    /// Run the route guard for a session
    Guard {
        /// Raw session role; unknown values count as no role
        #[arg(long)]
        role: Option<String>,

        /// Treat the session as logged out
        #[arg(long)]
        anonymous: bool,

        /// Restrict the view to these roles (repeatable)
        #[arg(long = "require-role")]
        require_roles: Vec<Role>,

        /// Let anonymous visitors through
        #[arg(long)]
        no_auth: bool,

        #[arg(long)]
        path: String,
    },

    /// List the permissions granted to a role
    Permissions {
        #[arg(long)]
        role: Role,
    },

    /// List the route prefixes a role may open
    Routes {
        #[arg(long)]
        role: Role,
    },

    /// Report gaps and contradictions in the permission matrix
    Validate,
}

fn load_policy(config: Option<PathBuf>) -> anyhow::Result<AccessPolicy> {
    let config = match config {
        Some(path) => {
            anyhow::ensure!(path.exists(), "config file not found: {}", path.display());
            StaffgateConfig::load_from(&path)?
        }
        None => StaffgateConfig::load_from(DEFAULT_CONFIG_FILE)?,
    };

    init_logging(&config.logging.to_runtime()).context("failed to initialize logging")?;
    log::debug!(target: "staffgate::cli", "Access configuration: {:?}", config.access);
    AccessPolicy::load(&config.access)
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let policy = load_policy(cli.config)?;
    let json = cli.json;

    match cli.command {
        Commands::CheckPermission { role, module, action } => {
            commands::emit(&commands::check::permission(&policy, role, &module, &action), json)
        }
        Commands::CheckRoute { role, path } => {
            commands::emit(&commands::check::route(&policy, role, &path), json)
        }
        Commands::Guard { role, anonymous, require_roles, no_auth, path } => {
            let report = commands::check::guard(
                &policy,
                role.as_deref(),
                !anonymous,
                require_roles,
                !no_auth,
                &path,
            );
            commands::emit(&report, json)
        }
        Commands::Permissions { role } => {
            commands::emit(&commands::inspect::permissions(&policy, role), json)
        }
        Commands::Routes { role } => commands::emit(&commands::inspect::routes(&policy, role), json),
        Commands::Validate => commands::emit(&commands::inspect::validate(&policy), json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
