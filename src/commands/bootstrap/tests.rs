//! Tests for the bootstrap run.

use super::*;
use crate::test_support::RecordingExecutor;
use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(config: &Path, extra: &[&str]) -> Cli {
    let mut args = vec!["orca", "--config", config.to_str().unwrap()];
    args.extend_from_slice(extra);
    Cli::try_parse_from(args).unwrap()
}

fn masters_in(path: &Path) -> Vec<String> {
    MinionConfig::load(path).unwrap().masters
}

#[test]
fn test_minion_install_registers_master() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "Master: [10.0.0.1]\n").unwrap();

    let executor = RecordingExecutor::with_output(b"salt installed\n");
    let mut out = Vec::new();
    let args = cli(&config, &["--type", "minion", "--master", "10.0.0.2"]);

    cmd_bootstrap(&args, &executor, &mut out).unwrap();

    assert_eq!(masters_in(&config), vec!["10.0.0.2", "10.0.0.1"]);
    assert!(fs::read_to_string(&config).unwrap().contains("Master"));
    assert_eq!(String::from_utf8(out).unwrap(), "Result: salt installed\n");

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "bash");
    assert_eq!(
        executor.scripts(),
        vec![CommandTemplates::default().bootstrap]
    );
}

#[test]
fn test_empty_master_list_gets_single_entry() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "Master: []\n").unwrap();

    let executor = RecordingExecutor::default();
    let args = cli(&config, &["--type", "both", "--master", "192.168.1.1"]);

    cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap();

    assert_eq!(masters_in(&config), vec!["192.168.1.1"]);
    assert!(executor.scripts()[0].ends_with(" -M"));
}

#[test]
fn test_master_mode_passes_master_only_flags() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "master: []\n").unwrap();

    let executor = RecordingExecutor::default();
    let args = cli(&config, &["--type", "master", "--master", "127.0.0.1"]);

    cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap();

    assert!(executor.scripts()[0].ends_with(" -M -N"));
}

#[test]
fn test_missing_type_runs_nothing_and_leaves_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "Master: [10.0.0.1]\n").unwrap();

    let executor = RecordingExecutor::default();
    let args = cli(&config, &["--master", "10.0.0.2"]);

    let err = cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, OrcaError::Usage(_)));
    assert_eq!(err.exit_code(), 1);
    assert!(executor.calls().is_empty());
    assert_eq!(fs::read_to_string(&config).unwrap(), "Master: [10.0.0.1]\n");
}

#[test]
fn test_invalid_type_runs_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "master: []\n").unwrap();

    for bad in ["", "bogus"] {
        let executor = RecordingExecutor::default();
        let args = cli(&config, &["--type", bad]);

        let err = cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, OrcaError::Usage(_)), "{bad:?}");
        assert!(executor.calls().is_empty());
    }
}

#[test]
fn test_installer_failure_stops_before_config_edit() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "master: [a]\n").unwrap();

    let executor = RecordingExecutor::failing();
    let mut out = Vec::new();
    let args = cli(&config, &["--type", "minion", "--master", "b", "--restart"]);

    let err = cmd_bootstrap(&args, &executor, &mut out).unwrap_err();

    assert!(matches!(err, OrcaError::Install(_)));
    assert_eq!(executor.calls().len(), 1);
    assert_eq!(fs::read_to_string(&config).unwrap(), "master: [a]\n");
    assert!(out.is_empty());
}

#[test]
fn test_missing_config_fails_before_result_is_printed() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");

    let executor = RecordingExecutor::with_output(b"installed");
    let mut out = Vec::new();
    let args = cli(&config, &["--type", "minion", "--master", "10.0.0.2"]);

    let err = cmd_bootstrap(&args, &executor, &mut out).unwrap_err();

    assert!(matches!(err, OrcaError::Read(_)));
    assert_ne!(err.exit_code(), 0);
    assert!(out.is_empty());
    assert!(!config.exists());
}

#[test]
fn test_post_install_steps_run_after_config_write() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "master: []\n").unwrap();

    let executor = RecordingExecutor::default();
    let args = cli(
        &config,
        &["--type", "both", "--master", "salt", "--restart", "--accept-keys"],
    );

    cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap();

    let templates = CommandTemplates::default();
    let scripts = executor.scripts();
    assert_eq!(scripts.len(), 5);
    assert_eq!(scripts[1], templates.restart_master);
    assert_eq!(scripts[2], templates.remove_old_key);
    assert_eq!(scripts[3], templates.restart_minion);
    assert_eq!(scripts[4], templates.accept_all_keys);
}

#[test]
fn test_git_version_reaches_bootstrap() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "master: []\n").unwrap();

    let executor = RecordingExecutor::default();
    let args = cli(&config, &["--type", "minion", "--git", "2014.7"]);

    cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap();

    assert!(executor.scripts()[0].ends_with("-P git 2014.7"));
}

#[test]
fn test_templates_file_overrides_bootstrap() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "master: []\n").unwrap();
    let templates = temp_dir.path().join("templates.yaml");
    fs::write(&templates, "bootstrap: 'sh /opt/bootstrap-salt.sh'\n").unwrap();

    let executor = RecordingExecutor::default();
    let args = cli(
        &config,
        &[
            "--type",
            "master",
            "--templates",
            templates.to_str().unwrap(),
        ],
    );

    cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap();

    assert_eq!(executor.scripts(), vec!["sh /opt/bootstrap-salt.sh -M -N"]);
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "master: [10.0.0.1]\n").unwrap();

    let executor = RecordingExecutor::default();
    let mut out = Vec::new();
    let args = cli(
        &config,
        &["--type", "minion", "--master", "10.0.0.2", "--dry-run", "--restart"],
    );

    cmd_bootstrap(&args, &executor, &mut out).unwrap();

    assert!(executor.calls().is_empty());
    assert_eq!(fs::read_to_string(&config).unwrap(), "master: [10.0.0.1]\n");

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("would run: bash -c "), "{printed}");
    assert!(printed.contains("10.0.0.2"));
    assert!(printed.contains("salt-minion restart"));
}

#[test]
fn test_unknown_keys_survive_full_run() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("minion");
    fs::write(&config, "id: web01\nmaster: salt\nlog_level: debug\n").unwrap();

    let executor = RecordingExecutor::default();
    let args = cli(&config, &["--type", "minion", "--master", "10.0.0.2"]);

    cmd_bootstrap(&args, &executor, &mut Vec::new()).unwrap();

    let loaded = MinionConfig::load(&config).unwrap();
    assert_eq!(loaded.masters, vec!["10.0.0.2", "salt"]);
    assert_eq!(loaded.get("id"), Some(&serde_yaml::Value::from("web01")));
    assert_eq!(loaded.get("log_level"), Some(&serde_yaml::Value::from("debug")));
}
