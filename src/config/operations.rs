//! Config loading and record lookups.

use super::model::{CommandSpec, Config, ContainerSpec, Section};
use crate::error::{Result, RunoError};
use crate::schema::{COMMAND_SCHEMA, CONTAINER_SCHEMA};
use log::debug;
use std::path::Path;
use toml::Table;

/// Top-level key holding command records.
pub const COMMANDS_KEY: &str = "commands";

/// Top-level key holding container records.
pub const CONTAINERS_KEY: &str = "docker_containers";

impl Config {
    /// Load config from a TOML file.
    ///
    /// Schema problems do not fail loading; they are recorded per
    /// collection. Only unreadable files and TOML syntax errors do.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading config from '{}'", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| RunoError::ConfigUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| RunoError::ConfigUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse config from a TOML string.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let table: Table = toml::from_str(content)?;
        Ok(Self::from_table(&table))
    }

    /// Validate an already parsed document.
    pub fn from_table(table: &Table) -> Self {
        Self {
            commands: Section::parse(COMMANDS_KEY, table.get(COMMANDS_KEY), &COMMAND_SCHEMA),
            containers: Section::parse(
                CONTAINERS_KEY,
                table.get(CONTAINERS_KEY),
                &CONTAINER_SCHEMA,
            ),
        }
    }

    /// Look up a valid command.
    ///
    /// The error carries all command errors, since a broken record is the
    /// usual reason a configured command cannot be found.
    pub fn command(&self, name: &str) -> Result<&CommandSpec> {
        self.commands
            .find(name)
            .ok_or_else(|| RunoError::UnknownCommand {
                name: name.to_string(),
                errors: self.commands.errors().to_vec(),
            })
    }

    /// Look up a valid container.
    pub fn container(&self, name: &str) -> Result<&ContainerSpec> {
        if let Some(spec) = self.containers.find(name) {
            return Ok(spec);
        }

        match self.containers.errors_for(name) {
            Some(errors) => Err(RunoError::InvalidContainer {
                name: name.to_string(),
                errors,
            }),
            None => Err(RunoError::ContainerNotFound(name.to_string())),
        }
    }
}
