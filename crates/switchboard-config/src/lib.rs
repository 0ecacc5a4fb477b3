//! Shared configuration for Switchboard tools.
//!
//! TOML profiles, token resolution (env var, then keyring, then plaintext),
//! and translation to `switchboard_core::ClientConfig`. The CLI layers its
//! flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use switchboard_core::{AuthScheme, ClientConfig, TlsVerification};

/// Keyring service name; entries are keyed `{profile}/token`.
pub const KEYRING_SERVICE: &str = "switchboard";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SWITCHBOARD_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: explicit, then `default_profile`.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// API root URL (e.g., "https://dash.example.com/api/").
    pub backend: String,

    /// `Authorization` scheme: "bearer" or "token".
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,

    /// Token (plaintext, prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable holding the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Display name recorded on login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

fn default_auth_scheme() -> String {
    "bearer".into()
}

impl Profile {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            auth_scheme: default_auth_scheme(),
            token: None,
            token_env: None,
            username: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$SWITCHBOARD_CONFIG`, then platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("dev", "switchboard", "switchboard").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("switchboard");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if it exists), then `SWITCHBOARD_*` env.
///
/// Nested keys use a double underscore:
/// `SWITCHBOARD_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("SWITCHBOARD_")
                .ignore(&["CONFIG", "TOKEN", "PROFILE", "BACKEND", "OUTPUT", "INSECURE", "TIMEOUT"])
                .split("__"),
        );

    Ok(figment.extract()?)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/token"),
    )?)
}

/// Save a token to the system keyring for `profile_name`.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token)?;
    Ok(())
}

/// Resolve a token from the chain: `token_env` variable, system keyring,
/// then plaintext `token`.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_token_with(
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        |name| keyring_entry(name).ok()?.get_password().ok(),
    )
}

/// [`resolve_token`] with injectable env and keyring lookups.
pub fn resolve_token_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(value) = profile.token_env.as_deref().and_then(&env) {
        debug!(profile = profile_name, "token from environment");
        return Ok(SecretString::from(value));
    }

    // 2. System keyring
    if let Some(value) = keyring(profile_name) {
        debug!(profile = profile_name, "token from keyring");
        return Ok(SecretString::from(value));
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `ClientConfig` from a profile, without CLI overrides.
///
/// A profile with no resolvable token yields `token: None`; the dashboard
/// then starts logged out.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let url: url::Url = profile
        .backend
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {}", profile.backend),
        })?;

    let auth_scheme: AuthScheme =
        profile
            .auth_scheme
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "auth_scheme".into(),
                reason: format!("expected 'bearer' or 'token', got '{}'", profile.auth_scheme),
            })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ClientConfig {
        url,
        token: resolve_token(profile, profile_name).ok(),
        auth_scheme,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn profile() -> Profile {
        Profile {
            token: Some("plain".into()),
            token_env: Some("SB_TEST_TOKEN".into()),
            ..Profile::new("https://dash.example.com/api/")
        }
    }

    #[test]
    fn env_var_wins_over_keyring_and_plaintext() {
        let token = resolve_token_with(
            &profile(),
            "default",
            |name| (name == "SB_TEST_TOKEN").then(|| "from-env".to_owned()),
            |_| Some("from-keyring".to_owned()),
        )
        .unwrap();
        assert_eq!(token.expose_secret(), "from-env");
    }

    #[test]
    fn keyring_is_keyed_by_profile() {
        let token = resolve_token_with(
            &profile(),
            "staging",
            |_| None,
            |name| (name == "staging").then(|| "from-keyring".to_owned()),
        )
        .unwrap();
        assert_eq!(token.expose_secret(), "from-keyring");
    }

    #[test]
    fn plaintext_is_last_resort() {
        let token = resolve_token_with(&profile(), "default", |_| None, |_| None).unwrap();
        assert_eq!(token.expose_secret(), "plain");
    }

    #[test]
    fn missing_token_is_an_error() {
        let bare = Profile::new("https://dash.example.com/api/");
        let err = resolve_token_with(&bare, "default", |_| None, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn profile_translation_applies_overrides() {
        let mut p = Profile::new("https://dash.example.com/api/");
        p.auth_scheme = "token".into();
        p.timeout = Some(5);
        p.ca_cert = Some(PathBuf::from("/etc/ssl/dash.pem"));

        let config = profile_to_client_config(&p, "default", &Defaults::default()).unwrap();
        assert_eq!(config.auth_scheme, AuthScheme::Token);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ssl/dash.pem"))
        );
    }

    #[test]
    fn insecure_default_applies_to_profiles() {
        let defaults = Defaults {
            insecure: true,
            ..Defaults::default()
        };
        let p = Profile::new("https://localhost:8000/api/");
        let config = profile_to_client_config(&p, "default", &defaults).unwrap();
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn bad_backend_url_is_rejected() {
        let p = Profile::new("not a url");
        let err = profile_to_client_config(&p, "default", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "backend"));
    }

    #[test]
    fn unknown_auth_scheme_is_rejected() {
        let mut p = Profile::new("https://dash.example.com/api/");
        p.auth_scheme = "basic".into();
        let err = profile_to_client_config(&p, "default", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "auth_scheme"));
    }

    #[test]
    fn profile_name_falls_back_to_default_profile() {
        let config = Config {
            default_profile: Some("prod".into()),
            ..Config::default()
        };
        assert_eq!(config.profile_name(None), "prod");
        assert_eq!(config.profile_name(Some("dev")), "dev");
        assert!(matches!(
            config.profile("prod"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }
}
