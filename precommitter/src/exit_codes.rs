//! Stable exit codes for precommitter CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Setup failed: invalid flags or config, install, hooks or I/O errors.
pub const FAILED: i32 = 1;
/// The operator cancelled an interactive prompt.
pub const CANCELLED: i32 = 2;
