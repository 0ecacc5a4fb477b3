//! CLI configuration: shared `switchboard_config` types plus resolution
//! that honors `GlobalOpts` flag overrides (--backend, --token, ...).

use std::time::Duration;

use secrecy::SecretString;

use switchboard_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use switchboard_config::{Config, Profile, config_path, load_config, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Build the dashboard's `ClientConfig` from the config file and flags.
///
/// Flags win over the profile. Without a matching profile, `--backend`
/// and `--token` alone are enough.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut client = match config.profiles.get(&profile_name) {
        Some(profile) => {
            switchboard_config::profile_to_client_config(profile, &profile_name, &config.defaults)?
        }
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => {
            let backend = global.backend.as_deref().ok_or(CliError::NoBackend)?;
            let mut client = ClientConfig::parse(backend)?;
            client.timeout = Duration::from_secs(config.defaults.timeout);
            if config.defaults.insecure {
                client.tls = TlsVerification::DangerAcceptInvalid;
            }
            client
        }
    };

    if let Some(ref backend) = global.backend {
        client.url = backend.parse().map_err(|_| CliError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {backend}"),
        })?;
    }
    if let Some(ref token) = global.token {
        client.token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    if client.token.is_none() {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    }
    Ok(client)
}
