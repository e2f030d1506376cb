//! Implementation of the bootstrap run.
//!
//! # What a run does
//!
//! 1. Resolves the install type (invalid or missing: usage error, nothing runs)
//! 2. Runs the salt bootstrap script for that type
//! 3. Loads the minion config and puts `--master` first in its master list
//! 4. Writes the config back
//! 5. Runs the requested post-install steps
//! 6. Prints the bootstrap output after a `Result: ` label
//!
//! Every step is fatal on failure; there is no retry and no rollback.

#[cfg(test)]
mod tests;

use crate::cli::Cli;
use crate::error::{OrcaError, Result};
use crate::install::{
    CommandExecutor, CommandTemplates, InstallMode, PostInstall, ShellCommand, install_command,
    post_install_commands,
};
use crate::minion::{self, MinionConfig};
use log::{info, warn};
use std::io::Write;

/// Label printed before the captured bootstrap output.
pub const RESULT_LABEL: &str = "Result: ";

/// Execute a bootstrap run.
pub fn cmd_bootstrap(
    cli: &Cli,
    executor: &dyn CommandExecutor,
    out: &mut dyn Write,
) -> Result<()> {
    let mode = resolve_mode(cli.install_type.as_deref())?;

    let templates = match &cli.templates {
        Some(path) => CommandTemplates::load(path)?,
        None => CommandTemplates::default(),
    };

    let install = install_command(mode, &templates, cli.git.as_deref())?;
    let steps = PostInstall {
        restart: cli.restart,
        accept_keys: cli.accept_keys,
    };
    let post = post_install_commands(mode, &templates, steps)?;

    if cli.master.is_empty() {
        warn!("--master is empty; an empty entry will be added to the master list");
    }

    if cli.dry_run {
        return dry_run(cli, &install, &post, out);
    }

    info!("installing salt ({})", mode);
    let result = install.run(executor)?;

    info!("registering master '{}' in {}", cli.master, cli.config.display());
    let mut config = MinionConfig::load(&cli.config)?;
    config.add_master(cli.master.as_str());
    let bytes = config.dump()?;
    minion::save(&cli.config, &bytes)?;
    info!(
        "{} now {:?} ({} other keys kept)",
        config.master_key(),
        config.masters,
        config.other_keys_len()
    );

    for cmd in &post {
        cmd.run(executor)?;
    }

    out.write_all(RESULT_LABEL.as_bytes())?;
    out.write_all(&result)?;
    out.flush()?;
    Ok(())
}

/// Parse the `--type` value; absent or unknown values are usage errors.
fn resolve_mode(install_type: Option<&str>) -> Result<InstallMode> {
    match install_type {
        Some(value) => value.parse(),
        None => Err(OrcaError::Usage("missing parameters: --type is required".to_string())),
    }
}

fn dry_run(
    cli: &Cli,
    install: &ShellCommand,
    post: &[ShellCommand],
    out: &mut dyn Write,
) -> Result<()> {
    let mut config = MinionConfig::load(&cli.config)?;
    config.add_master(cli.master.as_str());
    let yaml = config.to_yaml()?;

    writeln!(out, "would run: {}", install)?;
    writeln!(out, "would write {}:", cli.config.display())?;
    for line in yaml.lines() {
        writeln!(out, "  {}", line)?;
    }
    for cmd in post {
        writeln!(out, "would run: {}", cmd)?;
    }
    Ok(())
}
