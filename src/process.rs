//! Shell execution for composed command lines.
//!
//! Every process runo starts goes through a [`ShellRunner`]: the command
//! line is handed to `/bin/sh -c` as one string, so host-side expansions
//! such as `$(id -u)` in docker options keep working. Execution is
//! synchronous; the return code is the only result.

use crate::context::RunContext;
use crate::error::Result;
use anyhow::Context;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// What to do with a process's output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Inherit stdout and stderr.
    #[default]
    Inherit,
    /// Discard stdout, keep stderr visible.
    QuietStdout,
    /// Discard both streams.
    Silent,
}

/// Runs shell command lines and reports their return codes.
pub trait ShellRunner {
    /// Run `command_line` through the shell and wait for it.
    ///
    /// A non-zero return code is a normal result, not an error; `Err` means
    /// the process could not be started at all.
    fn run(&self, command_line: &str, output: Output) -> Result<i32>;
}

/// [`ShellRunner`] backed by `/bin/sh` in a fixed working directory.
#[derive(Debug, Clone)]
pub struct SystemShell {
    cwd: PathBuf,

    /// Log every command line before running it.
    trace: bool,
}

impl SystemShell {
    pub fn new(cwd: &Path, trace: bool) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            trace,
        }
    }

    /// Shell for an invocation: runs in the project root, traces in debug mode.
    pub fn for_context(ctx: &RunContext) -> Self {
        Self::new(&ctx.project_root, ctx.debug)
    }
}

impl ShellRunner for SystemShell {
    fn run(&self, command_line: &str, output: Output) -> Result<i32> {
        if self.trace {
            debug!("running: {}", command_line);
        }

        let mut command = Command::new("/bin/sh");
        command.arg("-c").arg(command_line).current_dir(&self.cwd);
        match output {
            Output::Inherit => {}
            Output::QuietStdout => {
                command.stdout(Stdio::null());
            }
            Output::Silent => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
            }
        }

        let status = command
            .status()
            .with_context(|| format!("failed to execute '{}'", command_line))?;

        Ok(return_code(status))
    }
}

/// Run a command whose outcome must not affect the result.
///
/// Used for teardown and `after` steps: non-zero codes and spawn
/// failures are logged and dropped.
pub fn run_best_effort(shell: &dyn ShellRunner, command_line: &str, output: Output) {
    match shell.run(command_line, output) {
        Ok(0) => {}
        Ok(code) => debug!("'{}' returned {}, ignoring", command_line, code),
        Err(e) => debug!("'{}' failed, ignoring: {}", command_line, e),
    }
}

/// Map an exit status to a shell-style return code.
///
/// Processes killed by a signal report `128 + signal`, as shells do.
fn return_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    crate::exit_codes::FAILURE
}
