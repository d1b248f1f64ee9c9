//! Tests for the init command.

use super::{TEMPLATE, cmd_init, write_template};
use crate::config::Config;
use crate::error::RunoError;
use crate::exit_codes;
use crate::orchestrator::{list_commands, list_containers};
use tempfile::TempDir;

#[test]
fn test_template_is_a_valid_config() {
    let config = Config::from_toml(TEMPLATE).unwrap();

    assert!(config.commands.errors().is_empty());
    assert!(config.containers.errors().is_empty());
    assert_eq!(
        config.commands.names(),
        vec!["test", "build", "shell", "update-deps"]
    );
    assert_eq!(list_containers(&config), vec!["alpine"]);
    assert_eq!(
        list_commands(&config)[0].examples,
        vec!["test --cov -vv", "test --last-failed"]
    );
}

#[test]
fn test_fresh_setup() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("runo.toml");

    cmd_init(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), TEMPLATE);
}

#[test]
fn test_existing_file_is_left_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("runo.toml");
    std::fs::write(&path, "# mine\n").unwrap();

    let err = write_template(&path).unwrap_err();

    assert!(matches!(err, RunoError::ConfigExists(_)));
    assert_eq!(err.exit_code(), exit_codes::PROTOCOL);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
}

#[test]
fn test_missing_parent_directory_is_unexpected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("runo.toml");

    let err = write_template(&path).unwrap_err();
    assert!(matches!(err, RunoError::Unexpected(_)));
    assert_eq!(err.exit_code(), exit_codes::FAILURE);
}
