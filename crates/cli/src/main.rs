//! Nexus CLI - Command-line access to the Nexus SaaS applications.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Authenticate through the ticket authority and call EMC2, EI3 or ER3.
//! - Print results as pretty JSON on stdout.
//!
//! Does NOT handle:
//! - Ticket or session logic (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod commands;
mod config_context;
mod dispatch;
mod error;

use std::io::IsTerminal;

use args::Cli;
use clap::Parser;
use config_context::load_config;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use nexus_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let exit_code = tokio::select! {
        result = run_command(cli, config) => match result {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("{:#}", e);
                let code = e.exit_code();
                tracing::debug!(
                    exit_code = code.as_i32(),
                    retryable = code.is_retryable(),
                    "command failed"
                );
                code
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            ExitCode::Interrupted
        }
    };

    std::process::exit(exit_code.as_i32());
}
