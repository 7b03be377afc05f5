//! Integration tests for config file resolution and loading
//!
//! Tests that manipulate PLANPILOT_CONFIG are marked with #[serial] so they
//! do not race each other on the process environment.

use planpilot_common::config::{
    load_config, resolve_config_source, ConfigSource, MarginMode, TomlConfig, CONFIG_ENV_VAR,
};
use planpilot_common::{Error, MetricKind};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_cli_argument_takes_precedence_over_env() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/planpilot-env.toml");

    let cli = PathBuf::from("/tmp/planpilot-cli.toml");
    let source = resolve_config_source(Some(&cli));
    assert_eq!(source, ConfigSource::CliArgument(cli));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_argument() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/planpilot-env.toml");

    let source = resolve_config_source(None);
    assert_eq!(
        source,
        ConfigSource::Environment(PathBuf::from("/tmp/planpilot-env.toml"))
    );

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_empty_env_var_ignored() {
    env::set_var(CONFIG_ENV_VAR, "");

    let source = resolve_config_source(None);
    assert!(!matches!(source, ConfigSource::Environment(_)));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_compiled_defaults_load() {
    let config = load_config(&ConfigSource::CompiledDefaults).unwrap();
    assert_eq!(config, TomlConfig::default());
    assert!(ConfigSource::CompiledDefaults.path().is_none());
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
        host = "127.0.0.1"
        port = 8080

        [logging]
        level = "debug"

        [margins.hi]
        mode = "absolute"
        value = 0.05

        [margins.revisions]
        gating = true
        value = 1
        "#,
    );

    let config = load_config(&ConfigSource::CliArgument(path)).unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.margins.hi.mode, MarginMode::Absolute);

    let revisions = config.margins.policy(MetricKind::Revisions);
    assert!(revisions.gating);
    assert_eq!(revisions.margin.mode, MarginMode::Absolute);
    assert_eq!(revisions.margin.value, 1.0);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let result = load_config(&ConfigSource::Environment(path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_margin_in_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
        [margins.ci]
        mode = "relative"
        value = -0.05
        "#,
    );

    let result = load_config(&ConfigSource::CliArgument(path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_file_is_toml_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "port = \"not a number\"");

    let result = TomlConfig::load(&path);
    assert!(matches!(result, Err(Error::Toml(_))));
}

#[test]
fn test_example_config_parses() {
    let example = include_str!("../../planpilot.example.toml");
    let config = TomlConfig::from_toml_str(example).unwrap();
    assert_eq!(config.margins.ci.mode, MarginMode::Relative);
    assert_eq!(config.margins.ci.value, 0.05);
    assert!(!config.margins.planning_time.gating);
}
