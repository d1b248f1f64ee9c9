//! Core validation logic for declarative schemas.

use toml::{Table, Value};

use super::types::{ErrorMap, FieldType, GLOBAL_KEY, Schema};

const MISSING: &str = "mandatory field missing";
const UNSUPPORTED: &str = "unsupported field";

impl Schema {
    /// Validate a single record against this schema.
    ///
    /// Returns an empty map if and only if the record is fully valid.
    /// Checks per field, in order: presence, declared, type, custom check,
    /// required companions, conflicting companions. A type mismatch stops
    /// the remaining checks for that field.
    pub fn validate(&self, data: &Value) -> ErrorMap {
        let mut errors = ErrorMap::new();

        let Some(table) = data.as_table() else {
            push(
                &mut errors,
                GLOBAL_KEY,
                format!(
                    "must be represented by table, got {}",
                    FieldType::of(data).name()
                ),
            );
            return errors;
        };

        for rule in self.fields {
            if rule.required && !table.contains_key(rule.name) {
                push(&mut errors, rule.name, MISSING.to_string());
            }
        }

        for (field, value) in table {
            let Some(rule) = self.field(field) else {
                push(&mut errors, field, UNSUPPORTED.to_string());
                continue;
            };

            let actual = FieldType::of(value);
            if !rule.types.contains(&actual) {
                let expected = rule
                    .types
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>()
                    .join(" or ");
                push(
                    &mut errors,
                    field,
                    format!("should be of type {}, got {}", expected, actual.name()),
                );
                continue;
            }

            if let Some(check) = rule.check
                && let Some(message) = check(value)
            {
                push(&mut errors, field, message);
            }

            let missing: Vec<&str> = rule
                .requires
                .iter()
                .copied()
                .filter(|name| !table.contains_key(*name))
                .collect();
            if !missing.is_empty() {
                push(
                    &mut errors,
                    field,
                    format!(
                        "requires following fields to be present as well, but they are not found: {}",
                        missing.join(", ")
                    ),
                );
            }

            let conflicting: Vec<&str> = rule
                .excludes
                .iter()
                .copied()
                .filter(|name| table.contains_key(*name))
                .collect();
            if !conflicting.is_empty() {
                push(
                    &mut errors,
                    field,
                    format!("conflicting fields found: {}", conflicting.join(", ")),
                );
            }
        }

        if !self.one_of_required.is_empty()
            && !self
                .one_of_required
                .iter()
                .any(|name| table.contains_key(*name))
        {
            let mut names = self.one_of_required.to_vec();
            names.sort_unstable();
            push(
                &mut errors,
                GLOBAL_KEY,
                format!(
                    "one of the following fields must be present: {}",
                    names.join(", ")
                ),
            );
        }

        errors
    }
}

/// Validate every record of a collection independently.
///
/// Returns the valid records (with their index in `entries`, input order
/// preserved) and the error report for the invalid ones, one line per
/// field, formatted as `<collection>.<index>.<field>: <msg>; <msg>` and
/// sorted lexicographically. A record with any error is excluded from the
/// valid set.
pub fn validate_many<'a>(
    collection: &str,
    entries: &'a [Value],
    schema: &Schema,
) -> (Vec<(usize, &'a Table)>, Vec<String>) {
    let mut valid = Vec::new();
    let mut report = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let errors = schema.validate(entry);
        if errors.is_empty() {
            if let Some(table) = entry.as_table() {
                valid.push((index, table));
            }
        } else {
            report.extend(format_errors(collection, index, &errors));
        }
    }

    report.sort();
    (valid, report)
}

/// Render one record's errors as report lines.
pub fn format_errors(collection: &str, index: usize, errors: &ErrorMap) -> Vec<String> {
    errors
        .iter()
        .map(|(field, messages)| {
            format!("{}.{}.{}: {}", collection, index, field, messages.join("; "))
        })
        .collect()
}

fn push(errors: &mut ErrorMap, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}
