//! Error types for the runo CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Schema violations are not errors here: they are collected as data by the
//! validator and only surface through the variants below when they stop a
//! requested operation.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for runo operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum RunoError {
    /// The config file passed explicitly does not exist.
    #[error("config file doesn't exist: '{}'", .0.display())]
    ConfigNotFound(PathBuf),

    /// No config file in the working directory or any of its parents.
    #[error(
        "no '{0}' found in the current directory or any parent.\n\
         Create one with 'runo --init' or point to it with '--config'"
    )]
    ConfigNotDiscovered(&'static str),

    /// The config file exists but could not be read or parsed.
    #[error("failed to load config '{}': {message}", .path.display())]
    ConfigUnreadable { path: PathBuf, message: String },

    /// The requested command is not among the valid configured commands.
    #[error("command '{name}' is not present in the config{}", format_hint(.errors))]
    UnknownCommand { name: String, errors: Vec<String> },

    /// A target container is not declared in the config.
    #[error(
        "container '{0}' is not found in the config.\n\
         Use '--containers' to list all containers present in the config"
    )]
    ContainerNotFound(String),

    /// A target container is declared but fails validation.
    #[error(
        "container '{name}' is invalid:\n{}\n\
         Use '--containers' to list all containers present in the config",
        format_list(.errors)
    )]
    InvalidContainer { name: String, errors: Vec<String> },

    /// Building the image for a container failed.
    #[error("failed to build docker image for container '{container}' (exit code {code})")]
    BuildFailed { container: String, code: i32 },

    /// A command failed in some of several containers.
    #[error(
        "command '{command}' has failed in {}/{total} containers:\n{}",
        .failed.len(),
        format_failures(.failed)
    )]
    PartialFailure {
        command: String,
        total: usize,
        failed: Vec<(String, i32)>,
    },

    /// `--init` would overwrite an existing file.
    #[error(
        "file '{}' already exists.\n\
         Review it and either generate the new config under a different path (use '--config'),\n\
         or move the existing file away and run '--init' again",
        .0.display()
    )]
    ConfigExists(PathBuf),

    /// Anything else: I/O failures, processes that could not be spawned.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl RunoError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunoError::ConfigNotFound(_) => exit_codes::UNAVAILABLE,
            RunoError::ConfigNotDiscovered(_) => exit_codes::UNAVAILABLE,
            RunoError::ConfigUnreadable { .. } => exit_codes::CONFIG,
            RunoError::UnknownCommand { errors, .. } if errors.is_empty() => {
                exit_codes::UNAVAILABLE
            }
            RunoError::UnknownCommand { .. } => exit_codes::CONFIG,
            RunoError::ContainerNotFound(_) => exit_codes::CONFIG,
            RunoError::InvalidContainer { .. } => exit_codes::CONFIG,
            RunoError::BuildFailed { code, .. } => *code,
            RunoError::PartialFailure { .. } => exit_codes::PARTIAL_FAILURE,
            RunoError::ConfigExists(_) => exit_codes::PROTOCOL,
            RunoError::Unexpected(_) => exit_codes::FAILURE,
        }
    }
}

fn format_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_hint(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    format!(
        "\nerrors detected in 'commands' (probably the reason why the command can't be found):\n{}",
        format_list(errors)
    )
}

fn format_failures(failed: &[(String, i32)]) -> String {
    failed
        .iter()
        .map(|(name, code)| format!("  - {} has returned {}", name, code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for runo operations.
pub type Result<T> = std::result::Result<T, RunoError>;
