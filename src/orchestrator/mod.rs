//! Command execution across host and containers.
//!
//! The orchestrator turns a command name plus CLI input into processes:
//! 1. Look up the command and compose its invocation
//! 2. Resolve target containers (CLI override, then `docker_container`)
//! 3. Run on the host when there are none, otherwise in each target in order
//! 4. Fold the per-target return codes into one exit code
//!
//! Targets are processed strictly sequentially. Each one gets its own
//! backend guard, so cleanup and `after` steps run before the next target
//! starts, whatever happened in between.

mod invocation;


use crate::backend::{BackendGuard, ContainerBackend};
use crate::config::{CommandSpec, Config};
use crate::context::RunContext;
use crate::error::{Result, RunoError};
use crate::exit_codes;
use crate::options::{ensure_user, strip_interactive, tokenize};
use crate::process::{Output, ShellRunner, run_best_effort};
use log::debug;

pub use invocation::{after_invocation, compose_invocation};

/// Container name selecting every configured container.
pub const ALL_CONTAINERS: &str = "*";

/// Listing entry for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub name: String,
    pub description: String,
    pub examples: Vec<String>,
}

/// Containers a command runs in.
///
/// A non-empty CLI override wins over the command's `docker_container`; a
/// lone `*` expands to every valid container in config order. An empty
/// result means the command runs on the host.
pub fn resolve_targets(command: &CommandSpec, cli_override: &[String], config: &Config) -> Vec<String> {
    match cli_override {
        [only] if only == ALL_CONTAINERS => config
            .containers
            .names()
            .into_iter()
            .map(String::from)
            .collect(),
        [] => command.docker_container.iter().cloned().collect(),
        names => names.to_vec(),
    }
}

/// Run a configured command and return the exit code for the process.
pub fn run_command(
    ctx: &RunContext,
    shell: &dyn ShellRunner,
    config: &Config,
    name: &str,
    cli_options: &[String],
    container_override: &[String],
) -> Result<i32> {
    let command = config.command(name)?;
    let invocation = compose_invocation(&command.before, &command.execute, cli_options);
    let after = after_invocation(&command.after);
    let targets = resolve_targets(command, container_override, config);

    if targets.is_empty() {
        if !container_override.is_empty() {
            return Err(RunoError::ContainerNotFound(container_override.join(", ")));
        }
        return run_on_host(shell, &invocation, after.as_deref());
    }

    let mut results = Vec::with_capacity(targets.len());
    for target in &targets {
        let code = run_in_container(ctx, shell, config, command, target, &invocation, after.clone())?;
        results.push((target.clone(), code));
    }

    aggregate(name, results)
}

fn run_on_host(shell: &dyn ShellRunner, invocation: &str, after: Option<&str>) -> Result<i32> {
    debug!("no containers targeted, running on host");
    let result = shell.run(invocation, Output::Inherit);
    if let Some(after) = after {
        run_best_effort(shell, after, Output::Inherit);
    }
    result
}

fn run_in_container(
    ctx: &RunContext,
    shell: &dyn ShellRunner,
    config: &Config,
    command: &CommandSpec,
    target: &str,
    invocation: &str,
    after: Option<String>,
) -> Result<i32> {
    let spec = config.container(target)?;
    let backend = ContainerBackend::from_spec(spec, &ctx.repo_name());
    let mut guard = BackendGuard::new(backend, shell, after);

    debug!("running in container '{}'", guard.backend().name());
    guard.backend_mut().prepare(shell)?;

    let run_options = strip_interactive(
        ensure_user(tokenize(command.docker_run_options.as_deref())),
        ctx.stdin_is_tty,
    );
    let code = guard.backend().run(shell, &run_options, invocation)?;
    guard.finish();

    debug!("container '{}' returned {}", target, code);
    Ok(code)
}

/// Fold per-container return codes into one exit code.
///
/// A single target passes its code through. With several, any failure
/// becomes [`RunoError::PartialFailure`] naming exactly the failed ones.
pub fn aggregate(command: &str, results: Vec<(String, i32)>) -> Result<i32> {
    if let [(_, code)] = results.as_slice() {
        return Ok(*code);
    }

    let total = results.len();
    let failed: Vec<(String, i32)> = results.into_iter().filter(|(_, code)| *code != 0).collect();
    if failed.is_empty() {
        return Ok(exit_codes::SUCCESS);
    }

    Err(RunoError::PartialFailure {
        command: command.to_string(),
        total,
        failed,
    })
}

/// Names of all valid containers, in config order.
pub fn list_containers(config: &Config) -> Vec<String> {
    config
        .containers
        .names()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Summaries of all valid commands, in config order.
///
/// A command without examples is shown with its bare name.
pub fn list_commands(config: &Config) -> Vec<CommandSummary> {
    config
        .commands
        .valid()
        .iter()
        .map(|command| CommandSummary {
            name: command.name.clone(),
            description: command.description.clone(),
            examples: if command.examples.is_empty() {
                vec![command.name.clone()]
            } else {
                command.examples.clone()
            },
        })
        .collect()
}
