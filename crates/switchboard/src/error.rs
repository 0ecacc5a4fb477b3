//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use switchboard_config::ConfigError;
use switchboard_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend: {message}")]
    #[diagnostic(
        code(switchboard::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Self-signed certificate? Retry with --insecure (-k)."
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(switchboard::auth_failed),
        help(
            "Verify the API token for profile '{profile}'.\n\
             Store a new one with: switchboard config set-token"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(switchboard::no_credentials),
        help(
            "Configure one with: switchboard config init\n\
             Or set the SWITCHBOARD_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(
        code(switchboard::not_found),
        help("Run: switchboard {list_command} to see what exists")
    )]
    NotFound {
        resource: String,
        identifier: String,
        list_command: String,
    },

    #[error("Operation '{operation}' is not available for {resource}")]
    #[diagnostic(code(switchboard::unsupported))]
    Unsupported { operation: String, resource: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Request rejected: {message}")]
    #[diagnostic(code(switchboard::rejected))]
    Rejected {
        message: String,
        /// Field-level errors, pre-rendered one per line.
        #[help]
        details: Option<String>,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(switchboard::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(switchboard::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: switchboard config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(switchboard::no_backend),
        help(
            "Create a profile with: switchboard config init\n\
             Or pass --backend <URL> (SWITCHBOARD_BACKEND)."
        )
    )]
    NoBackend,

    #[error(transparent)]
    #[diagnostic(code(switchboard::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(switchboard::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(switchboard::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Rejected { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NetworkFailure { message, .. } => CliError::ConnectionFailed { message },

            CoreError::AuthRejected { message } => CliError::AuthFailed {
                profile: "current".into(),
                message,
            },

            CoreError::ValidationFailed {
                message, details, ..
            } => CliError::Rejected {
                message,
                details: details.as_ref().and_then(render_details),
            },

            CoreError::NotFound {
                resource,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{} list", command_for(&resource)),
                resource,
                identifier,
            },

            CoreError::Unsupported {
                operation,
                resource,
            } => CliError::Unsupported {
                operation,
                resource,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "backend".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other),
        }
    }
}

/// CLI subcommand for a resource path segment.
fn command_for(resource: &str) -> &str {
    match resource {
        "training-jobs" | "trainingJobs" => "jobs",
        other => other,
    }
}

/// Flatten `{"field": ["msg", ...]}` into `field: msg` lines.
fn render_details(details: &serde_json::Value) -> Option<String> {
    let object = details.as_object()?;
    let lines: Vec<String> = object
        .iter()
        .map(|(field, value)| match value {
            serde_json::Value::Array(messages) => {
                let joined: Vec<String> = messages
                    .iter()
                    .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_owned))
                    .collect();
                format!("{field}: {}", joined.join("; "))
            }
            serde_json::Value::String(message) => format!("{field}: {message}"),
            other => format!("{field}: {other}"),
        })
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}
