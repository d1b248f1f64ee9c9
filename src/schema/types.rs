//! Declarative schema types.
//!
//! Schemas are plain `const` data: a list of field rules plus an optional
//! "one of these must be present" rule. They carry no state and can be
//! shared freely.

use std::collections::BTreeMap;
use toml::Value;

/// Key under which record-level (not field-level) errors are reported.
pub const GLOBAL_KEY: &str = "*";

/// Validation errors keyed by field name (or [`GLOBAL_KEY`]).
///
/// Ordered so that reports are deterministic.
pub type ErrorMap = BTreeMap<String, Vec<String>>;

/// Custom per-field check: `None` when the value is acceptable.
pub type Check = fn(&Value) -> Option<String>;

/// TOML value types a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Array,
    Table,
}

impl FieldType {
    /// Type of a concrete TOML value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => FieldType::String,
            Value::Integer(_) => FieldType::Integer,
            Value::Float(_) => FieldType::Float,
            Value::Boolean(_) => FieldType::Boolean,
            Value::Datetime(_) => FieldType::Datetime,
            Value::Array(_) => FieldType::Array,
            Value::Table(_) => FieldType::Table,
        }
    }

    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Datetime => "datetime",
            FieldType::Array => "array",
            FieldType::Table => "table",
        }
    }
}

/// Rule for a single field of a record.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    /// Accepted types; a value matching any of them passes the type check.
    pub types: &'static [FieldType],
    pub required: bool,
    pub check: Option<Check>,
    /// Fields that must be present alongside this one.
    pub requires: &'static [&'static str],
    /// Fields that must not be present alongside this one.
    pub excludes: &'static [&'static str],
}

impl FieldRule {
    /// An optional field accepting the given types.
    pub const fn new(name: &'static str, types: &'static [FieldType]) -> Self {
        Self {
            name,
            types,
            required: false,
            check: None,
            requires: &[],
            excludes: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn check(mut self, check: Check) -> Self {
        self.check = Some(check);
        self
    }

    pub const fn requires(mut self, fields: &'static [&'static str]) -> Self {
        self.requires = fields;
        self
    }

    pub const fn excludes(mut self, fields: &'static [&'static str]) -> Self {
        self.excludes = fields;
        self
    }
}

/// A record schema.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
    /// At least one of these fields must be present (empty disables the rule).
    pub one_of_required: &'static [&'static str],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}
