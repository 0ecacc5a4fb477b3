// ── Core error types ──
//
// User-facing errors from switchboard-core. Consumers never match on HTTP
// transport details: the `From<switchboard_api::Error>` impl folds them
// into the handful of kinds a view knows how to render.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification rendered by views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum ErrorKind {
    /// Transport or connection problem, including request timeouts and 5xx.
    NetworkFailure,
    /// Backend refused the credential (401/403), or no token is held.
    AuthRejected,
    /// Backend (or a local check) rejected the payload.
    ValidationFailure,
    /// The item no longer exists server-side.
    NotFound,
    /// The operation's capability is not part of this client.
    Unsupported,
    /// Undecodable response or misconfiguration.
    Internal,
}

/// What a slice's `errors` field holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Field-level details as sent by the backend, e.g. `{"webhook": ["..."]}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorPayload {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend: {message}")]
    NetworkFailure {
        message: String,
        status: Option<u16>,
    },

    #[error("Authentication rejected: {message}")]
    AuthRejected { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed {
        message: String,
        status: Option<u16>,
        details: Option<serde_json::Value>,
    },

    #[error("Not found: {resource} {identifier}")]
    NotFound {
        resource: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation} on {resource}")]
    Unsupported {
        operation: String,
        resource: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NetworkFailure { .. } => ErrorKind::NetworkFailure,
            Self::AuthRejected { .. } => ErrorKind::AuthRejected,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Config { .. } | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` if a manual retry might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }

    /// The payload dispatched into a slice's `errors`.
    pub fn payload(&self) -> ErrorPayload {
        let payload = ErrorPayload::new(self.kind(), self.to_string());
        match self {
            Self::NetworkFailure {
                status: Some(status),
                ..
            } => payload.with_status(*status),
            Self::ValidationFailed {
                status, details, ..
            } => {
                let payload = match status {
                    Some(status) => payload.with_status(*status),
                    None => payload,
                };
                match details {
                    Some(details) => payload.with_details(details.clone()),
                    None => payload,
                }
            }
            Self::NotFound { .. } => payload.with_status(404),
            _ => payload,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
            status: None,
            details: None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<switchboard_api::Error> for CoreError {
    fn from(err: switchboard_api::Error) -> Self {
        use switchboard_api::Error as Api;

        match err {
            Api::Unauthorized { message } | Api::Forbidden { message } => {
                CoreError::AuthRejected { message }
            }
            Api::InvalidToken(reason) => CoreError::AuthRejected {
                message: format!("Invalid token: {reason}"),
            },
            Api::Transport(ref e) => {
                if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        resource: "resource".into(),
                        identifier: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                    }
                } else {
                    CoreError::NetworkFailure {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::InvalidId(id) => CoreError::validation(format!("Invalid item ID: {id:?}")),
            Api::Tls(msg) => CoreError::NetworkFailure {
                message: format!("TLS error: {msg}"),
                status: None,
            },
            Api::Validation {
                status,
                message,
                details,
            } => CoreError::ValidationFailed {
                message,
                status: Some(status),
                details,
            },
            Api::NotFound { path } => {
                let (resource, identifier) = split_item_path(&path);
                CoreError::NotFound {
                    resource,
                    identifier,
                }
            }
            Api::Api { status, message } if status >= 500 => CoreError::NetworkFailure {
                message: format!("HTTP {status}: {message}"),
                status: Some(status),
            },
            Api::Api { status, message } => CoreError::ValidationFailed {
                message: format!("HTTP {status}: {message}"),
                status: Some(status),
                details: None,
            },
            Api::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

/// `/api/bots/7` -> (`bots`, `7`).
fn split_item_path(path: &str) -> (String, String) {
    let mut segments = path.trim_matches('/').rsplit('/');
    let identifier = segments.next().unwrap_or_default().to_owned();
    let resource = segments.next().unwrap_or("resource").to_owned();
    (resource, identifier)
}
