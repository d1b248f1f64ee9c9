//! RAII guard for a container backend.

use super::ContainerBackend;
use crate::process::{Output, ShellRunner, run_best_effort};

/// Owns a backend for the duration of one target run.
///
/// When finished or dropped, the backend is cleaned up and then the
/// command's `after` steps run on the host. This happens exactly once,
/// whether the run succeeded, returned non-zero, or failed to start.
pub struct BackendGuard<'a> {
    backend: ContainerBackend,
    shell: &'a dyn ShellRunner,

    /// Host-side invocation of the command's `after` steps.
    after: Option<String>,

    /// Whether teardown already ran.
    finished: bool,
}

impl<'a> BackendGuard<'a> {
    pub fn new(backend: ContainerBackend, shell: &'a dyn ShellRunner, after: Option<String>) -> Self {
        Self {
            backend,
            shell,
            after,
            finished: false,
        }
    }

    pub fn backend(&self) -> &ContainerBackend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut ContainerBackend {
        &mut self.backend
    }

    /// Tear down now instead of at end of scope.
    pub fn finish(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        self.backend.cleanup(self.shell);
        if let Some(after) = &self.after {
            run_best_effort(self.shell, after, Output::Inherit);
        }
    }
}

impl Drop for BackendGuard<'_> {
    fn drop(&mut self) {
        self.teardown();
    }
}
