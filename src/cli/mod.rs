//! CLI argument parsing for runo.
//!
//! Uses clap derive macros for declarative argument definitions.
//! There are no subcommands: the first positional argument names a
//! command from the config and everything after it is passed through to
//! that command untouched.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Runo: run project commands on the host or in docker containers.
///
/// Commands and containers are declared in `runo.toml`:
/// - Run `runo` without arguments to list available commands
/// - Run `runo <command> [options...]` to execute one
/// - Use `-c` to pick containers from the command line
#[derive(Parser, Debug)]
#[command(name = "runo")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Container to run the command in; repeatable, "*" selects all containers.
    #[arg(short = 'c', long = "container", value_name = "CONTAINER")]
    pub containers: Vec<String>,

    /// Print debug output, including every executed command.
    #[arg(short, long)]
    pub debug: bool,

    /// Path to the config file (default: runo.toml in this or a parent directory).
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Show all containers present in the config file.
    #[arg(long = "containers")]
    pub list_containers: bool,

    /// Create and initialize the config file.
    #[arg(long)]
    pub init: bool,

    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Command to run, followed by options passed through to it.
    #[arg(value_name = "COMMAND", trailing_var_arg = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Requested command name and its pass-through options.
    pub fn invocation(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(name, options)| (name.as_str(), options))
    }
}
