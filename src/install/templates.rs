//! Command templates for the installer.
//!
//! Every shell fragment orca runs lives here instead of in scattered
//! literals. The defaults drive the stock salt bootstrap; an operator can
//! override any subset from a YAML file (`--templates`).

use crate::error::{OrcaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named shell fragments used to build installer commands.
///
/// Unknown fields in the YAML are ignored; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTemplates {
    /// Shell program (with optional leading args) that runs each command via `-c`.
    pub shell: String,

    /// Fetch-and-pipe command that runs the bootstrap script.
    pub bootstrap: String,

    /// Bootstrap args selecting a git install; `{version}` is replaced.
    pub git_source: String,

    /// Bootstrap flags for a master-only install without the minion service.
    pub master_flags: String,

    /// Bootstrap flags for a master install alongside the minion.
    pub both_flags: String,

    /// Accept every pending minion key on the master.
    pub accept_all_keys: String,

    /// Remove the minion's cached master public key.
    pub remove_old_key: String,

    /// Restart the minion service.
    pub restart_minion: String,

    /// Restart the master service.
    pub restart_master: String,
}

impl Default for CommandTemplates {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            bootstrap: "/usr/bin/wget -O- https://bootstrap.saltstack.com | sudo sh -s --"
                .to_string(),
            git_source: "-P git {version}".to_string(),
            master_flags: "-M -N".to_string(),
            both_flags: "-M".to_string(),
            accept_all_keys: "sudo salt-key --accept-all --yes".to_string(),
            remove_old_key: "sudo rm -rf /etc/salt/pki/minion/minion_master.pub".to_string(),
            restart_minion: "sudo service salt-minion restart".to_string(),
            restart_master: "sudo service salt-master restart".to_string(),
        }
    }
}

impl CommandTemplates {
    /// Load templates from a YAML file, falling back to defaults per field.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            OrcaError::Config(format!(
                "failed to read templates file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse templates from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let templates: CommandTemplates = serde_yaml::from_str(yaml)
            .map_err(|e| OrcaError::Config(format!("failed to parse templates YAML: {}", e)))?;

        templates.validate()?;
        Ok(templates)
    }

    /// Reject templates that cannot produce a runnable installer command.
    pub fn validate(&self) -> Result<()> {
        if self.shell.trim().is_empty() {
            return Err(OrcaError::Config("'shell' must not be empty".to_string()));
        }
        if self.bootstrap.trim().is_empty() {
            return Err(OrcaError::Config("'bootstrap' must not be empty".to_string()));
        }
        Ok(())
    }

    /// Split `shell` into program and leading args.
    pub fn shell_argv(&self) -> Result<(String, Vec<String>)> {
        let mut argv = shell_words::split(&self.shell).map_err(|e| {
            OrcaError::Config(format!("failed to parse shell '{}': {}", self.shell, e))
        })?;
        if argv.is_empty() {
            return Err(OrcaError::Config("'shell' must not be empty".to_string()));
        }
        let program = argv.remove(0);
        Ok((program, argv))
    }

    /// Render the git source fragment for `version`.
    pub fn git_source_for(&self, version: &str) -> String {
        self.git_source.replace("{version}", version)
    }
}
