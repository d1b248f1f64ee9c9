//! Typed config records and the validated collections holding them.

use crate::schema::{FieldType, Schema, format_errors, validate_many};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use toml::Value;

/// A named, user-invocable operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,

    /// Shell fragment executed for the command.
    pub execute: String,

    /// Steps run before `execute`, in the same shell.
    #[serde(default)]
    pub before: Vec<String>,

    /// Steps run on the host after the command, even if it failed.
    #[serde(default)]
    pub after: Vec<String>,

    #[serde(default)]
    pub examples: Vec<String>,

    /// Container the command runs in by default.
    #[serde(default)]
    pub docker_container: Option<String>,

    #[serde(default)]
    pub docker_run_options: Option<String>,
}

/// A named execution target.
///
/// Exactly one backend is configured: a pulled image, a Dockerfile to
/// build, or a compose service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerSpec {
    pub name: String,

    #[serde(default)]
    pub docker_image: Option<String>,

    #[serde(default)]
    pub docker_file_path: Option<String>,

    #[serde(default)]
    pub docker_build_options: Option<String>,

    #[serde(default)]
    pub docker_compose_file_path: Option<String>,

    #[serde(default)]
    pub docker_compose_service: Option<String>,

    #[serde(default)]
    pub docker_compose_options: Option<String>,
}

/// Records addressable by name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for CommandSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ContainerSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One validated top-level collection.
///
/// Keeps the raw entries next to the typed valid records so per-record
/// errors can be reported for a name that failed validation.
#[derive(Debug, Clone)]
pub struct Section<T> {
    key: &'static str,
    schema: &'static Schema,
    entries: Vec<Value>,
    valid: Vec<T>,
    errors: Vec<String>,
}

impl<T: Named + DeserializeOwned> Section<T> {
    /// Validate the value stored under `key`; a missing key is an empty collection.
    pub(crate) fn parse(key: &'static str, value: Option<&Value>, schema: &'static Schema) -> Self {
        let mut section = Self {
            key,
            schema,
            entries: Vec::new(),
            valid: Vec::new(),
            errors: Vec::new(),
        };

        let entries = match value {
            None => return section,
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                section.errors.push(format!(
                    "{} should be represented by array, got {}",
                    key,
                    FieldType::of(other).name()
                ));
                return section;
            }
        };

        let (valid, mut errors) = validate_many(key, &entries, schema);
        for (index, table) in valid {
            match Value::Table(table.clone()).try_into::<T>() {
                Ok(spec) => section.valid.push(spec),
                Err(e) => errors.push(format!("{}.{}.*: {}", key, index, e)),
            }
        }
        errors.sort();

        section.entries = entries;
        section.errors = errors;
        section
    }
}

impl<T: Named> Section<T> {
    /// Valid records in config order.
    pub fn valid(&self) -> &[T] {
        &self.valid
    }

    /// Sorted error lines for the whole collection.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn names(&self) -> Vec<&str> {
        self.valid.iter().map(Named::name).collect()
    }

    /// First valid record called `name`.
    pub fn find(&self, name: &str) -> Option<&T> {
        self.valid.iter().find(|spec| spec.name() == name)
    }

    /// Error lines of the first invalid entry called `name`, if any.
    pub fn errors_for(&self, name: &str) -> Option<Vec<String>> {
        self.entries.iter().enumerate().find_map(|(index, entry)| {
            if entry.get("name").and_then(Value::as_str) != Some(name) {
                return None;
            }
            let errors = self.schema.validate(entry);
            if errors.is_empty() {
                None
            } else {
                Some(format_errors(self.key, index, &errors))
            }
        })
    }

    /// True when the collection has errors and nothing usable.
    pub fn is_unusable(&self) -> bool {
        self.valid.is_empty() && !self.errors.is_empty()
    }
}

/// Loaded config: both collections, validated.
///
/// Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub commands: Section<CommandSpec>,
    pub containers: Section<ContainerSpec>,
}
