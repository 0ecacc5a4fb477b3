use std::fmt;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Opaque bearer credential handed out by the auth collaborator.
///
/// The crate never inspects it beyond placing it in the `Authorization`
/// header. `Debug` is redacted.
#[derive(Clone)]
pub struct BearerToken(SecretString);

impl BearerToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(SecretString::from(raw.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for BearerToken {}

impl From<SecretString> for BearerToken {
    fn from(secret: SecretString) -> Self {
        Self(secret)
    }
}

impl From<&str> for BearerToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// How the token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `Authorization: Token <token>` (Django REST framework token auth).
    Token,
}

impl AuthScheme {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Bearer => "Bearer",
            Self::Token => "Token",
        }
    }

    /// Build a sensitive `Authorization` header value for `token`.
    pub fn header_value(self, token: &BearerToken) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("{} {}", self.prefix(), token.expose()))
            .map_err(|e| Error::InvalidToken(format!("invalid header value: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "token" => Ok(Self::Token),
            other => Err(Error::InvalidToken(format!(
                "unknown auth scheme '{other}' (expected 'bearer' or 'token')"
            ))),
        }
    }
}
