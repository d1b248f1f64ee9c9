//! Listings shown by `runo` without a command and by `runo --containers`.
//!
//! Valid entries go to stdout; collection errors go to stderr. A listing
//! fails only when its collection has errors and nothing valid to show.

use crate::config::{Config, Named, Section};
use crate::context::TOOL_NAME;
use crate::exit_codes;
use crate::orchestrator::{CommandSummary, list_commands, list_containers};

/// Show valid commands with their examples.
pub fn cmd_commands(config: &Config) -> i32 {
    report_errors("commands", &config.commands);

    let commands = list_commands(config);
    if commands.is_empty() {
        println!("No valid command configuration found");
    } else {
        print!("{}", render_commands(&commands));
    }

    status(&config.commands)
}

/// Show valid container names.
pub fn cmd_containers(config: &Config) -> i32 {
    report_errors("containers", &config.containers);

    let containers = list_containers(config);
    if containers.is_empty() {
        println!("No valid container configuration found");
    } else {
        print!("{}", render_containers(&containers));
    }

    status(&config.containers)
}

/// Shown when no config file exists yet.
pub fn print_init_hint() {
    println!("Config is not created yet.");
    println!("Please initialize it with '{} --init'", TOOL_NAME);
}

fn render_commands(commands: &[CommandSummary]) -> String {
    let mut out = String::from("Following commands are available:\n");
    for command in commands {
        out.push_str(&format!("  * {} - {}\n", command.name, command.description));
        for example in &command.examples {
            out.push_str(&format!("      {} {}\n", TOOL_NAME, example));
        }
    }
    out
}

fn render_containers(containers: &[String]) -> String {
    let mut out = String::from("Following containers are available:\n");
    for name in containers {
        out.push_str(&format!("  * {}\n", name));
    }
    out
}

fn render_errors(label: &str, errors: &[String]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    let mut out = format!("errors detected in configured {}:\n", label);
    for error in errors {
        out.push_str(&format!("  - {}\n", error));
    }
    Some(out)
}

fn report_errors<T: Named>(label: &str, section: &Section<T>) {
    if let Some(report) = render_errors(label, section.errors()) {
        eprint!("{}", report);
    }
}

fn status<T: Named>(section: &Section<T>) -> i32 {
    if section.is_unusable() {
        exit_codes::CONFIG
    } else {
        exit_codes::SUCCESS
    }
}
