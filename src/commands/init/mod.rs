//! Implementation of the `runo --init` command.
//!
//! Writes a commented starter config: a few example commands and one
//! example container, with the other container kinds commented out. An
//! existing file is never overwritten.

#[cfg(test)]
mod tests;

use crate::error::{Result, RunoError};
use anyhow::Context;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Starter config written by `--init`.
pub const TEMPLATE: &str = r#"
# Generated by `runo --init`: example commands and containers.
# Adjust them to your project, then run `runo` to list what is available.

#######################################################
# Commands
#######################################################
[[commands]]
name = "test"
description = "runs unit tests"
# OPTIONAL: steps executed before the main command, in the same shell.
# Typical use: activating a virtualenv.
before = ["echo Configure your test environment here"]
# Command to run. Options given after the command name on the CLI are
# appended to it, e.g. `runo test --cov -vv`.
execute = "echo ALL TESTS PASSED"
# OPTIONAL: steps executed on the host afterwards, even if the command failed.
after = ["echo done > /dev/null"]
# OPTIONAL: usage examples shown by `runo`; the bare name is shown otherwise.
examples = ["test --cov -vv", "test --last-failed"]
# OPTIONAL: container the command runs in by default. It must be declared
# below and can be overridden with `-c`.
# docker_container = "alpine"
# OPTIONAL: `docker run` options used for this command.
# docker_run_options = "-it -v .:/app -w /app"

[[commands]]
name = "build"
description = "builds the project"
execute = "echo Build is running"
after = ["echo done"]

[[commands]]
name = "shell"
description = "opens an interactive shell in the container"
execute = "/bin/sh"
docker_container = "alpine"
docker_run_options = "-it -v .:/app -w /app"

[[commands]]
name = "update-deps"
description = "updates project dependencies to their latest versions"
execute = "echo Script your dependency updates here"

#######################################################
# Containers
#######################################################

# 1) Image pulled from a registry.
[[docker_containers]]
name = "alpine"
docker_image = "alpine:3.14"

# 2) Image built from a local Dockerfile. Paths are relative to this file.
#[[docker_containers]]
#name = "python312"
#docker_file_path = "containers/python312/Dockerfile"
## OPTIONAL: `docker build` options. Without `--tag`, the image is tagged
## `<container>-for-<project directory>`.
#docker_build_options = "--pull"

# 3) Service of a docker compose file. Paths are relative to this file.
#[[docker_containers]]
#name = "app-with-db"
#docker_compose_file_path = "docker-compose.yml"
## Service whose container runs the commands.
#docker_compose_service = "app"
## OPTIONAL: global `docker compose` options.
#docker_compose_options = "--all-resources"
"#;

/// Execute the `runo --init` command.
pub fn cmd_init(path: &Path) -> Result<()> {
    write_template(path)?;
    println!("config created: {}", path.display());
    Ok(())
}

/// Create `path` with [`TEMPLATE`], failing if it already exists.
pub fn write_template(path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => RunoError::ConfigExists(path.to_path_buf()),
            _ => RunoError::Unexpected(
                anyhow::Error::new(e).context(format!("failed to create '{}'", path.display())),
            ),
        })?;

    file.write_all(TEMPLATE.as_bytes())
        .with_context(|| format!("failed to write '{}'", path.display()))?;

    Ok(())
}
