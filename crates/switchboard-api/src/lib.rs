// switchboard-api: async REST client for the dashboard backend
//
// Transport mechanics only: URL joining, bearer authorization headers,
// JSON bodies, and HTTP status to error mapping. State bookkeeping lives
// in `switchboard-core`.

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use auth::{AuthScheme, BearerToken};
pub use client::RestClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::header::HeaderValue;
