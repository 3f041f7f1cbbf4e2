//! Process exit codes. Single source of truth for scripts wrapping the CLI.

pub const EXIT_SUCCESS: u8 = 0;
/// Unexpected runtime failure.
pub const EXIT_ERROR: u8 = 1;
/// File read/write failure.
pub const EXIT_IO: u8 = 3;
/// Malformed partition input (bad JSON shape, duplicate items).
pub const EXIT_INVALID_INPUT: u8 = 4;
/// Assignment solver exhausted its iteration budget.
pub const EXIT_NON_CONVERGENCE: u8 = 5;
/// Bad options file.
pub const EXIT_INVALID_OPTIONS: u8 = 6;
