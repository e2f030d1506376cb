//! Orca: bootstrap a SaltStack master/minion and register the minion with its master.
//!
//! This is the main entry point for the `orca` CLI. It parses arguments,
//! sets up logging, runs the bootstrap, and maps errors to exit codes.

mod cli;
mod commands;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod install;
pub mod minion;

#[cfg(test)]
mod test_support;

use cli::Cli;
use error::OrcaError;
use std::io::Write;
use std::process::ExitCode;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version come through here too.
            return if err.use_stderr() {
                ExitCode::from(exit_codes::FAILURE as u8)
            } else {
                ExitCode::from(exit_codes::SUCCESS as u8)
            };
        }
    };

    init_logging(cli.verbose);

    match commands::dispatch(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            report_error(&err, &mut std::io::stdout(), &mut std::io::stderr());
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Print a failed run. Usage errors also print the help text to stdout.
fn report_error(err: &OrcaError, stdout: &mut dyn Write, stderr: &mut dyn Write) {
    let _ = writeln!(stderr, "Error: {}", err);
    if matches!(err, OrcaError::Usage(_)) {
        let _ = writeln!(stdout, "{}", Cli::usage());
    }
}
