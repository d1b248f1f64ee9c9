//! Configuration model for runo.
//!
//! This module loads `runo.toml`: two top-level arrays of tables,
//! `commands` and `docker_containers`. Every record is validated against
//! its schema; valid records are deserialized into typed specs, invalid
//! ones are kept only as error lines so listing and lookups can explain
//! why something is missing. Unknown top-level keys are ignored.

mod model;
mod operations;


// Re-export public API
pub use model::{CommandSpec, Config, ContainerSpec, Named, Section};
