// Async HTTP client for the dashboard backend.
//
// Resource paths are joined onto a normalized base URL (always ending in
// `/`). Every request carries an `Authorization` header built by the
// caller, so one client serves every resource and every token.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Response shapes ──────────────────────────────────────────────────

/// Collection endpoints answer either a bare array or a paginated
/// `{ "count": N, "results": [...] }` envelope.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paged { results: items } => items,
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Raw REST client for the backend.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections
/// internally.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a resource path (e.g. `"bots"`) onto the base URL.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Path of a single collection member: `{base}/{id}`, with `id`
    /// percent-encoded as exactly one segment.
    pub fn item_path(base: &str, id: &str) -> Result<String, Error> {
        // URL parsing resolves dot segments even when percent-encoded.
        if id.is_empty() || id == "." || id == ".." {
            return Err(Error::InvalidId(id.to_owned()));
        }
        let mut scratch = Url::parse("http://localhost/")?;
        scratch
            .path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .clear()
            .extend(base.split('/').filter(|segment| !segment.is_empty()))
            .push(id);
        Ok(scratch.path().trim_start_matches('/').to_owned())
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// `GET {path}`, accepting a bare array or a paginated envelope.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &HeaderValue,
    ) -> Result<Vec<T>, Error> {
        let envelope: ListEnvelope<T> = self.get(path, auth).await?;
        Ok(envelope.into_items())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &HeaderValue,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, auth.clone())
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        auth: &HeaderValue,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, auth.clone())
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        auth: &HeaderValue,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self
            .http
            .patch(url)
            .header(AUTHORIZATION, auth.clone())
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub async fn delete(&self, path: &str, auth: &HeaderValue) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .header(AUTHORIZATION, auth.clone())
            .send()
            .await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = preview(&body);
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let path = resp.url().path().to_owned();
        let raw = resp.text().await.unwrap_or_default();
        let details = serde_json::from_str::<serde_json::Value>(&raw).ok();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.detail.or(err.message))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    preview(&raw)
                }
            });

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Error::Unauthorized { message },
            reqwest::StatusCode::FORBIDDEN => Error::Forbidden { message },
            reqwest::StatusCode::NOT_FOUND => Error::NotFound { path },
            reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                Error::Validation {
                    status: status.as_u16(),
                    message,
                    details,
                }
            }
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// First 200 characters of a response body, for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
