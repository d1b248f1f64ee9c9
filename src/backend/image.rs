//! Plain image backend: pull by reference, or build from a Dockerfile.

use super::{FILE_FLAGS, command_line};
use crate::config::ContainerSpec;
use crate::context::CONTAINER_NAME_ENV;
use crate::error::{Result, RunoError};
use crate::options::{lookup, to_map, tokenize};
use crate::process::{Output, ShellRunner};
use log::debug;

const TAG_FLAGS: &[&str] = &["-t", "--tag"];

const DEFAULT_DOCKERFILE: &str = "Dockerfile";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageSource {
    Pull(String),
    Build { options: Vec<String>, tag: String },
}

/// Backend running `docker run` against an image reference.
#[derive(Debug, Clone)]
pub struct ImageBackend {
    container: String,
    source: ImageSource,
    reference: Option<String>,
}

impl ImageBackend {
    pub fn from_spec(spec: &ContainerSpec, repo_name: &str) -> Self {
        let source = match &spec.docker_image {
            Some(image) => ImageSource::Pull(image.clone()),
            None => {
                let file_path = spec
                    .docker_file_path
                    .as_deref()
                    .unwrap_or(DEFAULT_DOCKERFILE);
                let (options, tag) = build_options(
                    file_path,
                    spec.docker_build_options.as_deref(),
                    &spec.name,
                    repo_name,
                );
                ImageSource::Build { options, tag }
            }
        };

        Self {
            container: spec.name.clone(),
            source,
            reference: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.container
    }

    /// Image reference `run()` uses; known after `prepare()`.
    #[cfg(test)]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Options passed to `docker build`, if the image is built locally.
    #[cfg(test)]
    pub fn build_options(&self) -> Option<&[String]> {
        match &self.source {
            ImageSource::Build { options, .. } => Some(options),
            ImageSource::Pull(_) => None,
        }
    }

    pub fn prepare(&mut self, shell: &dyn ShellRunner) -> Result<()> {
        if self.reference.is_some() {
            return Ok(());
        }

        match &self.source {
            ImageSource::Pull(image) => {
                self.reference = Some(image.clone());
            }
            ImageSource::Build { options, tag } => {
                debug!("building image '{}' for container '{}'", tag, self.container);
                let line = command_line(
                    ["docker", "build", "."]
                        .into_iter()
                        .chain(options.iter().map(String::as_str)),
                );
                let code = shell.run(&line, Output::QuietStdout)?;
                if code != 0 {
                    return Err(RunoError::BuildFailed {
                        container: self.container.clone(),
                        code,
                    });
                }
                self.reference = Some(tag.clone());
            }
        }
        Ok(())
    }

    pub fn run(&self, shell: &dyn ShellRunner, run_options: &[String], command: &str) -> Result<i32> {
        let reference = self.reference.as_deref().ok_or_else(|| {
            anyhow::anyhow!("container '{}' was run before being prepared", self.container)
        })?;

        let env = format!("{}={}", CONTAINER_NAME_ENV, self.container);
        let line = command_line(
            ["docker", "run", "--quiet", "-e", env.as_str()]
                .into_iter()
                .chain(run_options.iter().map(String::as_str))
                .chain([reference, command]),
        );
        shell.run(&line, Output::Inherit)
    }
}

/// Options for `docker build` and the tag the image ends up with.
///
/// `--file` and `--tag` are injected ahead of the configured options
/// unless those already carry a value for them.
fn build_options(
    file_path: &str,
    configured: Option<&str>,
    container: &str,
    repo_name: &str,
) -> (Vec<String>, String) {
    let user = tokenize(configured);
    let map = to_map(&user);
    let mut options = Vec::new();

    if lookup(&map, FILE_FLAGS).is_none() {
        options.push("--file".to_string());
        options.push(file_path.to_string());
    }

    let tag = match lookup(&map, TAG_FLAGS) {
        Some(tag) => tag.to_string(),
        None => {
            // Docker rejects upper-case repository names.
            let tag = format!("{}-for-{}", container, repo_name).to_lowercase();
            options.push("--tag".to_string());
            options.push(tag.clone());
            tag
        }
    };

    options.extend(user);
    (options, tag)
}
