#![allow(clippy::unwrap_used)]
// Config file loading and saving against temporary directories.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use switchboard_config::{Config, Profile, load_config_from, save_config_to};

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.default_profile.as_deref(), Some("default"));
    assert_eq!(config.defaults.output, "table");
    assert_eq!(config.defaults.timeout, 30);
    assert!(config.profiles.is_empty());
}

#[test]
fn profiles_are_read_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_profile = "staging"

[defaults]
output = "json"
timeout = 10

[profiles.staging]
backend = "https://staging.example.com/api/"
auth_scheme = "token"
token_env = "STAGING_TOKEN"

[profiles.local]
backend = "http://localhost:8000/api/"
insecure = true
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();

    assert_eq!(config.profile_name(None), "staging");
    assert_eq!(config.defaults.output, "json");
    assert_eq!(config.defaults.timeout, 10);
    // Unset fields keep their defaults.
    assert_eq!(config.defaults.color, "auto");

    let staging = config.profile("staging").unwrap();
    assert_eq!(staging.auth_scheme, "token");
    assert_eq!(staging.token_env.as_deref(), Some("STAGING_TOKEN"));

    let local = config.profile("local").unwrap();
    assert_eq!(local.auth_scheme, "bearer");
    assert_eq!(local.insecure, Some(true));
}

#[test]
fn saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.profiles.insert(
        "default".into(),
        Profile {
            ca_cert: Some(PathBuf::from("/etc/ssl/dash.pem")),
            timeout: Some(12),
            ..Profile::new("https://dash.example.com/api/")
        },
    );

    save_config_to(&path, &config).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[profiles.default]"));
    assert!(!written.contains("token"), "unset token must not be written");

    assert_eq!(load_config_from(&path).unwrap(), config);
}

#[test]
fn malformed_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_profile = [unclosed").unwrap();

    assert!(load_config_from(&path).is_err());
}
