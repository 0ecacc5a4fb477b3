use thiserror::Error;

/// Top-level error type for the `switchboard-api` crate.
///
/// Covers every failure mode of a single REST exchange: transport,
/// authorization, payload validation, missing resources, and decoding.
/// `switchboard-core` maps these into the error kinds surfaced to views.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Backend answered 401: token missing, expired, or revoked.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Backend answered 403: token valid but not allowed.
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// The token could not be encoded as an `Authorization` header.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An item ID that cannot be addressed as a single path segment.
    #[error("Invalid item ID: {0:?}")]
    InvalidId(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend responses ───────────────────────────────────────────
    /// Backend rejected the payload (HTTP 400 / 422).
    ///
    /// `details` carries the raw JSON error body when there is one,
    /// typically a `{ "field": ["message", ...] }` map.
    #[error("Validation failed (HTTP {status}): {message}")]
    Validation {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Resource does not exist (HTTP 404).
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the backend refused the credential.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::Forbidden { .. } | Self::InvalidToken(_)
        )
    }

    /// Returns `true` if this is a transient error worth retrying by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// HTTP status attached to the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Validation { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
