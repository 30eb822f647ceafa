//! HTTP client for the Admin API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod admin;

pub use admin::{ACCESS_TOKEN_HEADER, AdminClient};

use reqwest::StatusCode;

/// Errors produced by the Admin API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("graphql errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
}
