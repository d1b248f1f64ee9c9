use crate::context::{CONFIG_FILE_NAME, RunContext};
use crate::error::Result;
use crate::process::{Output, ShellRunner};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// [`ShellRunner`] that records invocations instead of running them.
///
/// Return codes are scripted by substring: the first registered pattern
/// contained in a command line decides its code, everything else returns 0.
#[derive(Default)]
pub(crate) struct RecordingShell {
    calls: RefCell<Vec<(String, Output)>>,
    responses: Vec<(String, i32)>,
    failures: Vec<String>,
}

impl RecordingShell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return `code` for command lines containing `pattern`.
    pub(crate) fn respond(mut self, pattern: &str, code: i32) -> Self {
        self.responses.push((pattern.to_string(), code));
        self
    }

    /// Fail to start command lines containing `pattern`.
    pub(crate) fn fail_on(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(line, _)| line.clone()).collect()
    }

    pub(crate) fn output_of(&self, pattern: &str) -> Option<Output> {
        self.calls
            .borrow()
            .iter()
            .find(|(line, _)| line.contains(pattern))
            .map(|(_, output)| *output)
    }

    pub(crate) fn count(&self, pattern: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(line, _)| line.contains(pattern))
            .count()
    }
}

impl ShellRunner for RecordingShell {
    fn run(&self, command_line: &str, output: Output) -> Result<i32> {
        self.calls
            .borrow_mut()
            .push((command_line.to_string(), output));

        if self.failures.iter().any(|p| command_line.contains(p.as_str())) {
            return Err(anyhow::anyhow!("failed to execute '{}'", command_line).into());
        }

        Ok(self
            .responses
            .iter()
            .find(|(pattern, _)| command_line.contains(pattern.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0))
    }
}

/// Write `content` as the config file in `dir` and return its path.
pub(crate) fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    std::fs::write(&path, content).unwrap();
    path
}

/// Context for a project called `demo`, with a non-interactive stdin.
pub(crate) fn test_context() -> RunContext {
    let mut ctx = RunContext::new(PathBuf::from("/work/demo").join(CONFIG_FILE_NAME), false);
    ctx.stdin_is_tty = false;
    ctx
}
