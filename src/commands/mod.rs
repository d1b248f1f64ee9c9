//! Command implementations for runo.
//!
//! This module provides the dispatcher that routes parsed CLI input to
//! one of: `--init`, the container listing, the command listing, or the
//! execution of a configured command.

mod init;
mod list;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::{CONFIG_FILE_NAME, RunContext, locate_config};
use crate::error::{Result, RunoError};
use crate::exit_codes;
use crate::orchestrator;
use crate::process::SystemShell;
use log::debug;
use std::path::PathBuf;

/// Dispatch parsed CLI input and return the process exit code.
pub fn dispatch(cli: &Cli) -> Result<i32> {
    if cli.init {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        init::cmd_init(&path)?;
        return Ok(exit_codes::SUCCESS);
    }

    let Some(config_path) = locate_config(cli.config.as_deref())? else {
        return without_config(cli);
    };

    let ctx = RunContext::new(config_path, cli.debug);
    debug!("using config '{}'", ctx.config_path.display());
    let config = Config::load(&ctx.config_path)?;

    if cli.list_containers {
        return Ok(list::cmd_containers(&config));
    }

    match cli.invocation() {
        None => Ok(list::cmd_commands(&config)),
        Some((name, options)) => {
            let shell = SystemShell::for_context(&ctx);
            orchestrator::run_command(&ctx, &shell, &config, name, options, &cli.containers)
        }
    }
}

/// Nothing to run or list: hint at `--init`, or fail if a command was asked for.
fn without_config(cli: &Cli) -> Result<i32> {
    if cli.invocation().is_some() {
        return Err(RunoError::ConfigNotDiscovered(CONFIG_FILE_NAME));
    }
    list::print_init_hint();
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_config;
    use clap::Parser;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[[commands]]
name = "hello"
description = "says hi"
execute = "echo ok"

[[commands]]
name = "fail"
description = "exits with the first option"
execute = "exit"

[[commands]]
name = "touch"
description = "creates a marker next to the config"
execute = "touch marker"
after = ["touch after-marker"]
"#;

    fn dispatch_args(args: &[&str]) -> Result<i32> {
        let cli = Cli::try_parse_from(std::iter::once("runo").chain(args.iter().copied())).unwrap();
        dispatch(&cli)
    }

    #[test]
    fn test_host_command_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_config(temp_dir.path(), CONFIG);
        let config = config.to_str().unwrap();

        assert_eq!(dispatch_args(&["--config", config, "hello"]).unwrap(), 0);
        assert_eq!(dispatch_args(&["--config", config, "fail", "3"]).unwrap(), 3);
    }

    #[test]
    fn test_commands_run_in_project_root() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_config(temp_dir.path(), CONFIG);

        let code = dispatch_args(&["--config", config.to_str().unwrap(), "touch"]).unwrap();

        assert_eq!(code, 0);
        assert!(temp_dir.path().join("marker").is_file());
        assert!(temp_dir.path().join("after-marker").is_file());
    }

    #[test]
    fn test_listings() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_config(temp_dir.path(), CONFIG);
        let config = config.to_str().unwrap();

        assert_eq!(dispatch_args(&["--config", config]).unwrap(), exit_codes::SUCCESS);
        assert_eq!(
            dispatch_args(&["--config", config, "--containers"]).unwrap(),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_unknown_command() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_config(temp_dir.path(), CONFIG);

        let err = dispatch_args(&["--config", config.to_str().unwrap(), "deploy"]).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::UNAVAILABLE);
    }

    #[test]
    fn test_missing_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let err = dispatch_args(&["--config", missing.to_str().unwrap()]).unwrap_err();
        assert!(matches!(err, RunoError::ConfigNotFound(_)));
        assert_eq!(err.exit_code(), exit_codes::UNAVAILABLE);
    }

    #[test]
    fn test_command_without_config_suggests_init() {
        let cli = Cli::try_parse_from(["runo", "test"]).unwrap();
        let err = without_config(&cli).unwrap_err();

        assert!(matches!(err, RunoError::ConfigNotDiscovered(CONFIG_FILE_NAME)));
        assert_eq!(err.exit_code(), exit_codes::UNAVAILABLE);
        assert!(err.to_string().contains("current directory or any parent"));
        assert!(err.to_string().contains("runo --init"));
    }

    #[test]
    fn test_listing_without_config_is_success() {
        let cli = Cli::try_parse_from(["runo"]).unwrap();
        assert_eq!(without_config(&cli).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_init_at_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        let path = path.to_str().unwrap();

        assert_eq!(dispatch_args(&["--init", "--config", path]).unwrap(), 0);
        let err = dispatch_args(&["--init", "--config", path]).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::PROTOCOL);
    }
}
