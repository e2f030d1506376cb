//! Error types for the orca CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for orca operations.
///
/// Low-level routines return these instead of exiting so that `main` alone
/// decides what gets printed and which exit code the process ends with.
#[derive(Error, Debug)]
pub enum OrcaError {
    /// Missing or invalid command line arguments.
    #[error("{0}")]
    Usage(String),

    /// The bootstrap script or a post-install step failed.
    #[error("install failed: {0}")]
    Install(String),

    /// The minion config file could not be read.
    #[error("failed to read minion config: {0}")]
    Read(String),

    /// The minion config file is not valid YAML of the expected shape.
    #[error("failed to parse minion config: {0}")]
    Decode(String),

    /// The minion config could not be serialized.
    #[error("failed to serialize minion config: {0}")]
    Encode(String),

    /// The minion config file could not be written.
    #[error("failed to write minion config: {0}")]
    Write(String),

    /// The command templates file is unreadable or invalid.
    #[error("invalid command templates: {0}")]
    Config(String),

    /// Writing the run summary failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrcaError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            OrcaError::Usage(_)
            | OrcaError::Install(_)
            | OrcaError::Read(_)
            | OrcaError::Decode(_)
            | OrcaError::Encode(_)
            | OrcaError::Write(_)
            | OrcaError::Config(_)
            | OrcaError::Io(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for orca operations.
pub type Result<T> = std::result::Result<T, OrcaError>;
