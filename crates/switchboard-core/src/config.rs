// ── Runtime connection configuration ──
//
// These types describe how to reach the dashboard backend. They carry the
// credential and transport tuning but never touch disk: the CLI (or any
// other host) builds a `ClientConfig` and hands it to `Dashboard::new`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use switchboard_api::{AuthScheme, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

impl TlsVerification {
    fn to_transport(&self) -> TlsMode {
        match self {
            Self::SystemDefaults => TlsMode::System,
            Self::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            Self::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Configuration for talking to one backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://dash.example.com/api/`.
    pub url: Url,
    /// Token to log in with on startup. `None` starts logged out.
    pub token: Option<SecretString>,
    pub auth_scheme: AuthScheme,
    pub tls: TlsVerification,
    /// Per-request timeout. Expiry surfaces as a network failure.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            token: None,
            auth_scheme: AuthScheme::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Parse `url` and build a config with defaults for everything else.
    pub fn parse(url: &str) -> Result<Self, CoreError> {
        let url = url.parse::<Url>().map_err(|e| CoreError::Config {
            message: format!("invalid backend URL '{url}': {e}"),
        })?;
        Ok(Self::new(url))
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.to_transport(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_bearer() {
        let config = ClientConfig::parse("https://dash.example.com/api/").unwrap();
        assert_eq!(config.auth_scheme, AuthScheme::Bearer);
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token.is_none());
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = ClientConfig::parse("not a url").unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn transport_mirrors_tls_choice() {
        let mut config = ClientConfig::parse("https://localhost:8000/api").unwrap();
        config.tls = TlsVerification::DangerAcceptInvalid;
        config.timeout = Duration::from_secs(5);

        let transport = config.transport();
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }
}
