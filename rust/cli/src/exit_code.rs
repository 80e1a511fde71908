//! Exit codes returned by [`crate::run`].

/// Success, including `--help` and `--version`.
pub const SUCCESS: i32 = 0;

/// Usage, configuration, input and I/O errors.
pub const ERROR: i32 = 2;
