//! Declarative record validation for runo configuration.
//!
//! A [`Schema`] lists field rules (type, required, custom check, fields
//! that must or must not appear alongside) and an optional "one of these
//! fields must be present" rule. Validation is pure and collects every
//! problem instead of stopping at the first one:
//! - Errors are reported per field, record-level errors under `*`
//! - A record with any error is never partially used
//! - Batch reports are sorted so output is deterministic

mod rules;
mod types;
mod validator;


// Re-export public API
pub use rules::{COMMAND_SCHEMA, CONTAINER_SCHEMA};
pub use types::{ErrorMap, FieldType, Schema};
pub use validator::{format_errors, validate_many};
