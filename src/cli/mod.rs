//! CLI argument parsing for orca.
//!
//! Uses clap derive macros for declarative argument definitions. The
//! single-dash long spellings (`-type master -master 10.0.0.1`) that older
//! provisioning scripts pass are rewritten to `--type`/`--master` before
//! clap sees them.

use crate::minion::DEFAULT_MINION_CONFIG;
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Orca: bootstrap a salt master/minion and point the minion at its master.
///
/// Runs the salt bootstrap script for the selected install type, then
/// prepends the given master address to the minion config.
#[derive(Parser, Debug)]
#[command(name = "orca")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Install type: master, minion or both.
    #[arg(long = "type", value_name = "TYPE")]
    pub install_type: Option<String>,

    /// Master address to put first in the minion's master list.
    #[arg(long, value_name = "ADDRESS", default_value = "")]
    pub master: String,

    /// Minion config file to edit.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MINION_CONFIG)]
    pub config: PathBuf,

    /// YAML file overriding the installer command templates.
    #[arg(long, value_name = "PATH")]
    pub templates: Option<PathBuf>,

    /// Install from git at the given version instead of packages.
    #[arg(long, value_name = "VERSION")]
    pub git: Option<String>,

    /// After editing the config, clear the cached master key and restart services.
    #[arg(long)]
    pub restart: bool,

    /// After installing a master, accept all pending minion keys.
    #[arg(long)]
    pub accept_keys: bool,

    /// Print what would be run and written without doing either.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse process arguments, accepting single-dash long flags.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// Rendered `--help` text, for usage errors detected after parsing.
    pub fn usage() -> String {
        Cli::command().render_help().to_string()
    }
}

/// Rewrite `-name` / `-name=value` to `--name` / `--name=value` for every
/// long flag orca defines. Everything after `--` is left alone.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    // clap adds --help and --version only when the command is built.
    let mut longs: Vec<&str> = command.get_arguments().filter_map(|a| a.get_long()).collect();
    longs.extend(["help", "version"]);

    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        // argv[0] is the program name.
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            let name = rest.split('=').next().unwrap_or(rest);
            longs.contains(&name).then(|| OsString::from(format!("-{}", s)))
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}
