//! Exit code constants for the orca CLI.
//!
//! orca does not distinguish failure kinds by exit code:
//! - 0: Success
//! - 1: Any failure (bad args, installer failure, config read/decode/encode/write)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any failure. The error message on stderr says which one.
pub const FAILURE: i32 = 1;
