//! Runo: repository-agnostic command dispatcher.
//!
//! This is the main entry point for the `runo` CLI. It parses arguments,
//! installs the logger, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod backend;
mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
mod logger;
pub mod options;
mod orchestrator;
pub mod process;
pub mod schema;

#[cfg(test)]
mod test_support;

use cli::Cli;
use error::RunoError;
use log::debug;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(e) = logger::init(cli.debug) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
    debug!("debug logging enabled");

    match commands::dispatch(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            match &err {
                RunoError::Unexpected(inner) if cli.debug => eprintln!("Error: {:?}", inner),
                _ => eprintln!("Error: {}", err),
            }

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
