//! Container backends for runo.
//!
//! A configured container runs through one of two backends:
//! - `Image`: a pulled image, or one built from a Dockerfile
//! - `Composition`: a service of a docker compose file
//!
//! Both expose the same lifecycle: `prepare()` once, `run()` the composed
//! command, `cleanup()` afterwards. [`BackendGuard`] ties cleanup to scope
//! so it happens on every exit path.

mod compose;
mod guard;
mod image;


use crate::config::ContainerSpec;
use crate::error::Result;
use crate::process::ShellRunner;

pub use compose::ComposeBackend;
pub use guard::BackendGuard;
pub use image::ImageBackend;

/// Aliases of the option naming a Dockerfile or compose file.
const FILE_FLAGS: &[&str] = &["-f", "--file"];

/// Runtime strategy for one configured container.
#[derive(Debug, Clone)]
pub enum ContainerBackend {
    Image(ImageBackend),
    Composition(ComposeBackend),
}

impl ContainerBackend {
    /// Select the backend for a validated spec.
    ///
    /// A compose service selects `Composition`; anything else is an image.
    pub fn from_spec(spec: &ContainerSpec, repo_name: &str) -> Self {
        if spec.docker_compose_service.is_some() {
            Self::Composition(ComposeBackend::from_spec(spec))
        } else {
            Self::Image(ImageBackend::from_spec(spec, repo_name))
        }
    }

    /// Name of the configured container.
    pub fn name(&self) -> &str {
        match self {
            Self::Image(backend) => backend.name(),
            Self::Composition(backend) => backend.name(),
        }
    }

    /// Make the backend ready to run. Idempotent.
    pub fn prepare(&mut self, shell: &dyn ShellRunner) -> Result<()> {
        match self {
            Self::Image(backend) => backend.prepare(shell),
            Self::Composition(backend) => backend.prepare(shell),
        }
    }

    /// Run `command` in the container and return its code.
    pub fn run(&self, shell: &dyn ShellRunner, run_options: &[String], command: &str) -> Result<i32> {
        match self {
            Self::Image(backend) => backend.run(shell, run_options, command),
            Self::Composition(backend) => backend.run(shell, run_options, command),
        }
    }

    /// Tear down whatever `run()` left behind. Never fails.
    pub fn cleanup(&self, shell: &dyn ShellRunner) {
        match self {
            Self::Image(_) => {}
            Self::Composition(backend) => backend.cleanup(shell),
        }
    }
}

/// Join command-line parts with single spaces, skipping empty ones.
fn command_line<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|part| !part.as_ref().is_empty())
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
