//! Compose backend: runs a service from a docker compose file.

use super::{FILE_FLAGS, command_line};
use crate::config::ContainerSpec;
use crate::context::CONTAINER_NAME_ENV;
use crate::error::Result;
use crate::options::{lookup, to_map, tokenize};
use crate::process::{Output, ShellRunner, run_best_effort};

/// Backend running `docker compose run` against one service.
#[derive(Debug, Clone)]
pub struct ComposeBackend {
    container: String,
    service: String,
    file: String,
    options: Vec<String>,
}

impl ComposeBackend {
    pub fn from_spec(spec: &ContainerSpec) -> Self {
        let user = tokenize(spec.docker_compose_options.as_deref());
        let map = to_map(&user);
        let mut options = Vec::new();

        if !map.contains_key("--progress") {
            options.push("--progress".to_string());
            options.push("quiet".to_string());
        }

        let file = match lookup(&map, FILE_FLAGS) {
            Some(file) => file.to_string(),
            None => {
                let file = spec.docker_compose_file_path.clone().unwrap_or_default();
                options.push("--file".to_string());
                options.push(file.clone());
                file
            }
        };

        options.extend(user);

        Self {
            container: spec.name.clone(),
            service: spec.docker_compose_service.clone().unwrap_or_default(),
            file,
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.container
    }

    /// Compose file the service is defined in.
    #[cfg(test)]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Global options placed between `docker compose` and `run`.
    #[cfg(test)]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Nothing to resolve ahead of time; compose builds or pulls on `run`.
    pub fn prepare(&mut self, _shell: &dyn ShellRunner) -> Result<()> {
        Ok(())
    }

    pub fn run(&self, shell: &dyn ShellRunner, run_options: &[String], command: &str) -> Result<i32> {
        let env = format!("{}={}", CONTAINER_NAME_ENV, self.container);
        let line = command_line(
            ["docker", "compose"]
                .into_iter()
                .chain(self.options.iter().map(String::as_str))
                .chain(["run", "-e", env.as_str()])
                .chain(run_options.iter().map(String::as_str))
                .chain([self.service.as_str(), command]),
        );
        shell.run(&line, Output::Inherit)
    }

    /// Stop the composition and remove its containers and volumes.
    pub fn cleanup(&self, shell: &dyn ShellRunner) {
        let down = command_line([
            "docker",
            "compose",
            "--file",
            self.file.as_str(),
            "down",
            "--remove-orphans",
        ]);
        run_best_effort(shell, &down, Output::Silent);

        let rm = command_line(["docker", "compose", "--file", self.file.as_str(), "rm", "-fsv"]);
        run_best_effort(shell, &rm, Output::Silent);
    }
}
