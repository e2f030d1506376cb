//! Subprocess execution for installer commands.

use crate::error::{OrcaError, Result};
use log::debug;
use std::process::Command;

/// Runs an external program and returns its captured stdout.
///
/// A non-zero exit or a spawn failure is an `OrcaError::Install`.
pub trait CommandExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<Vec<u8>>;
}

/// Executor backed by `std::process::Command`. Blocks until the child exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
        debug!("exec: {} {}", program, shell_words::join(args));

        let output = Command::new(program).args(args).output().map_err(|e| {
            OrcaError::Install(format!(
                "failed to execute {}: {} (is it installed and in PATH?)",
                program, e
            ))
        })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());

        Err(OrcaError::Install(format!(
            "{} exited with status {}: {}",
            program, code, detail
        )))
    }
}
