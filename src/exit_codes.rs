//! Exit code constants for the runo CLI.
//!
//! These follow the BSD `sysexits.h` convention where one applies:
//! - 0: Success
//! - 1: Unexpected failure
//! - 69: Unavailable (missing config file, unknown command)
//! - 76: Protocol (refusing to overwrite an existing config)
//! - 78: Config (invalid configuration, unknown or invalid container)
//! - 255: Command failed in some, but not necessarily all, containers
//!
//! Codes returned by executed processes are passed through unchanged.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Unexpected failure (I/O, process spawn, anything not covered below).
pub const FAILURE: i32 = 1;

/// A required resource is unavailable: config file or command not found.
pub const UNAVAILABLE: i32 = 69;

/// The requested operation conflicts with existing state.
pub const PROTOCOL: i32 = 76;

/// The configuration is invalid or incomplete.
pub const CONFIG: i32 = 78;

/// A command failed in at least one of several containers.
pub const PARTIAL_FAILURE: i32 = 255;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, FAILURE, UNAVAILABLE, PROTOCOL, CONFIG, PARTIAL_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_fit_in_a_byte() {
        for code in [SUCCESS, FAILURE, UNAVAILABLE, PROTOCOL, CONFIG, PARTIAL_FAILURE] {
            assert!((0..=255).contains(&code));
        }
    }
}
