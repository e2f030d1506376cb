//! Command implementations for orca.
//!
//! orca has a single action; this module resolves the CLI arguments into a
//! bootstrap run and hands it the real subprocess executor.

mod bootstrap;

use crate::cli::Cli;
use crate::error::Result;
use crate::install::ShellExecutor;

pub use bootstrap::cmd_bootstrap;

/// Run orca with the parsed arguments, writing the summary to stdout.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cmd_bootstrap(cli, &ShellExecutor, &mut out)
}
