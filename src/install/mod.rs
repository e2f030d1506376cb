//! Installer invocation.
//!
//! Turns an install mode into a `bash -c "<bootstrap> <flags>"` command and
//! runs it through a [`CommandExecutor`]. The optional post-install steps
//! (key cleanup, service restarts, key acceptance) are built the same way.

mod executor;
pub mod templates;


pub use executor::{CommandExecutor, ShellExecutor};
pub use templates::CommandTemplates;

use crate::error::{OrcaError, Result};
use log::info;
use std::fmt;
use std::str::FromStr;

/// What the bootstrap script should install on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Master only, no minion service.
    Master,
    /// Minion only (the bootstrap default).
    Minion,
    /// Master and minion.
    Both,
}

impl InstallMode {
    /// Bootstrap flags selecting this mode, if any.
    pub fn flags<'a>(&self, templates: &'a CommandTemplates) -> Option<&'a str> {
        match self {
            InstallMode::Master => Some(templates.master_flags.as_str()),
            InstallMode::Both => Some(templates.both_flags.as_str()),
            InstallMode::Minion => None,
        }
    }

    /// Whether a master gets installed.
    pub fn installs_master(&self) -> bool {
        matches!(self, InstallMode::Master | InstallMode::Both)
    }

    /// Whether a minion gets installed.
    pub fn installs_minion(&self) -> bool {
        matches!(self, InstallMode::Minion | InstallMode::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMode::Master => "master",
            InstallMode::Minion => "minion",
            InstallMode::Both => "both",
        }
    }
}

impl FromStr for InstallMode {
    type Err = OrcaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "master" => Ok(InstallMode::Master),
            "minion" => Ok(InstallMode::Minion),
            "both" => Ok(InstallMode::Both),
            other => Err(OrcaError::Usage(format!(
                "invalid install type '{}': expected master, minion or both",
                other
            ))),
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built command: program plus argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    /// Wrap `script` as `<shell> -c <script>`.
    pub fn shell(templates: &CommandTemplates, script: impl Into<String>) -> Result<Self> {
        let (program, mut args) = templates.shell_argv()?;
        args.push("-c".to_string());
        args.push(script.into());
        Ok(Self { program, args })
    }

    /// The script passed to `-c`, if this is a shell command.
    pub fn script(&self) -> Option<&str> {
        let pos = self.args.iter().position(|a| a == "-c")?;
        self.args.get(pos + 1).map(String::as_str)
    }

    pub fn run(&self, executor: &dyn CommandExecutor) -> Result<Vec<u8>> {
        info!("running: {}", self);
        executor.execute(&self.program, &self.args)
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, shell_words::join(&self.args))
    }
}

/// Build the bootstrap command for `mode`.
///
/// Mode flags and the git source go inside the `-c` script so that the
/// bootstrap script receives them as its own arguments.
pub fn install_command(
    mode: InstallMode,
    templates: &CommandTemplates,
    git_version: Option<&str>,
) -> Result<ShellCommand> {
    let mut parts = vec![templates.bootstrap.trim().to_string()];

    if let Some(version) = git_version {
        parts.push(templates.git_source_for(version));
    }
    if let Some(flags) = mode.flags(templates) {
        parts.push(flags.to_string());
    }

    let script = parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ShellCommand::shell(templates, script)
}

/// Which optional steps run after the minion config is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostInstall {
    /// Drop the cached master key and restart the installed services.
    pub restart: bool,
    /// Accept all pending minion keys on the master.
    pub accept_keys: bool,
}

/// Build the post-install commands for `mode`, in execution order.
pub fn post_install_commands(
    mode: InstallMode,
    templates: &CommandTemplates,
    steps: PostInstall,
) -> Result<Vec<ShellCommand>> {
    let mut scripts: Vec<&str> = Vec::new();

    if steps.restart {
        if mode.installs_master() {
            scripts.push(&templates.restart_master);
        }
        if mode.installs_minion() {
            scripts.push(&templates.remove_old_key);
            scripts.push(&templates.restart_minion);
        }
    }
    if steps.accept_keys && mode.installs_master() {
        scripts.push(&templates.accept_all_keys);
    }

    scripts
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| ShellCommand::shell(templates, s))
        .collect()
}
