//! Error types for the Confluence client.

use crate::response::Payload;

/// Invalid connection settings, reported when the client is constructed.
///
/// Checks run in a fixed order and the first failure wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Username or password is empty.
    #[error("Confluence client requires both a username and a password")]
    MissingCredentials,

    /// Base URL is empty.
    #[error("Confluence client requires a base URL")]
    MissingBaseUrl,

    /// Base URL has no http:// or https:// scheme.
    #[error("Confluence base URL must start with http:// or https://, got {0}")]
    InvalidBaseUrl(String),
}

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// Client settings were rejected.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The space lookup did not lead to a usable home page.
    #[error("can't find space home page: {reason}")]
    HomePageNotFound {
        /// What was missing from the response.
        reason: String,
        /// The response received so far, for diagnostics.
        response: Box<Payload>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
