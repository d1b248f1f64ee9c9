//! The command and container schemas.

use toml::Value;

use super::types::{FieldRule, FieldType, Schema};

const STRING: &[FieldType] = &[FieldType::String];
const ARRAY: &[FieldType] = &[FieldType::Array];

/// Schema for entries of the `commands` collection.
pub const COMMAND_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule::new("name", STRING).required().check(check_name),
        FieldRule::new("description", STRING).required(),
        FieldRule::new("execute", STRING).required(),
        FieldRule::new("before", ARRAY).check(check_string_items),
        FieldRule::new("after", ARRAY).check(check_string_items),
        FieldRule::new("examples", ARRAY).check(check_string_items),
        FieldRule::new("docker_container", STRING),
        FieldRule::new("docker_run_options", STRING).requires(&["docker_container"]),
    ],
    one_of_required: &[],
};

/// Schema for entries of the `docker_containers` collection.
///
/// Exactly one backend discriminator is allowed: `docker_image`,
/// `docker_file_path` or `docker_compose_file_path`. The compose file and
/// service only make sense together, and compose options need a compose
/// file to apply to.
pub const CONTAINER_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule::new("name", STRING).required().check(check_name),
        FieldRule::new("docker_image", STRING)
            .excludes(&["docker_file_path", "docker_compose_file_path"]),
        FieldRule::new("docker_file_path", STRING)
            .excludes(&["docker_image", "docker_compose_file_path"]),
        FieldRule::new("docker_build_options", STRING),
        FieldRule::new("docker_compose_file_path", STRING)
            .requires(&["docker_compose_service"])
            .excludes(&["docker_image", "docker_file_path"]),
        FieldRule::new("docker_compose_service", STRING).requires(&["docker_compose_file_path"]),
        FieldRule::new("docker_compose_options", STRING).requires(&["docker_compose_file_path"]),
    ],
    one_of_required: &["docker_image", "docker_file_path", "docker_compose_file_path"],
};

/// Names may contain letters, digits, `-` and `_` only.
pub fn is_valid_name(name: &str) -> bool {
    let stripped: String = name.chars().filter(|c| *c != '-' && *c != '_').collect();
    !stripped.is_empty() && stripped.chars().all(char::is_alphanumeric)
}

fn check_name(value: &Value) -> Option<String> {
    let name = value.as_str()?;
    if is_valid_name(name) {
        None
    } else {
        Some(format!(
            "should consist only of letters, digits, '-', or '_', got '{}'",
            name
        ))
    }
}

fn check_string_items(value: &Value) -> Option<String> {
    let items = value.as_array()?;
    let offending = items.iter().find(|item| !item.is_str())?;
    Some(format!(
        "all items should be of type string, got {}",
        FieldType::of(offending).name()
    ))
}
