//! Invocation context resolution for runo.
//!
//! This module locates the config file and derives everything an
//! invocation needs from it: the project root (the directory holding the
//! config, where every process runs), the repository name used for
//! generated image tags, the debug flag, and whether stdin is a terminal.
//!
//! A `RunContext` is built once per process and passed explicitly to the
//! orchestrator; nothing in it changes afterwards.

use crate::error::{RunoError, Result};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Name of the tool, used in generated examples and hints.
pub const TOOL_NAME: &str = "runo";

/// Default config file name, looked up from the working directory upwards.
pub const CONFIG_FILE_NAME: &str = "runo.toml";

/// Environment variable carrying the container name into every container run.
pub const CONTAINER_NAME_ENV: &str = "RUNO_CONTAINER_NAME";

/// Resolved settings for one runo invocation.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Whether debug output was requested (`-d/--debug`).
    pub debug: bool,

    /// Path of the config file in use.
    pub config_path: PathBuf,

    /// Directory containing the config file; working directory for all processes.
    pub project_root: PathBuf,

    /// Whether stdin is an interactive terminal.
    pub stdin_is_tty: bool,
}

impl RunContext {
    /// Build the context for a config file.
    pub fn new(config_path: PathBuf, debug: bool) -> Self {
        let project_root = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Self {
            debug,
            config_path,
            project_root,
            stdin_is_tty: std::io::stdin().is_terminal(),
        }
    }

    /// Name of the project directory, used to tag locally built images.
    pub fn repo_name(&self) -> String {
        let root = self
            .project_root
            .canonicalize()
            .unwrap_or_else(|_| self.project_root.clone());

        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| TOOL_NAME.to_string())
    }
}

/// Find the config file to use.
///
/// An explicitly passed path must exist. Otherwise the working directory
/// and its ancestors are searched for [`CONFIG_FILE_NAME`]; `Ok(None)`
/// means no config has been created yet.
pub fn locate_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(RunoError::ConfigNotFound(path.to_path_buf()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let cwd = env::current_dir().map_err(|e| {
        RunoError::Unexpected(anyhow::anyhow!(
            "failed to get current working directory: {}",
            e
        ))
    })?;

    Ok(find_config(&cwd))
}

/// Search `start` and its ancestors for [`CONFIG_FILE_NAME`].
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
