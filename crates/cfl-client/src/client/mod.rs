//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence REST API (and the legacy
//! Confluence 4 prototype API) with basic authentication.
//!
//! Each operation is split into a request builder, which returns an
//! [`ApiRequest`], and a thin method that sends it through
//! [`ConfluenceClient::execute`].

mod attachments;
mod labels;
mod pages;
mod search;
mod space;

pub use pages::{NewPage, PageUpdate};

use tracing::debug;
use ureq::Agent;
use ureq::typestate::WithBody;

use crate::error::{ConfigurationError, ConfluenceError};
use crate::request::{ApiRequest, Method};
use crate::response::{self, Payload};
use crate::settings::{ApiConfig, ClientSettings};

/// `expand` value used by content reads and updates.
const DEFAULT_CONTENT_EXPAND: &str = "body.storage,version";

/// Confluence REST API client.
///
/// Holds only immutable state, so one client can be shared by reference
/// across threads.
#[derive(Debug)]
pub struct ConfluenceClient {
    agent: Agent,
    config: ApiConfig,
}

impl ConfluenceClient {
    /// Create a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when credentials or base URL are
    /// missing or the base URL is not http(s).
    pub fn new(settings: ClientSettings) -> Result<Self, ConfigurationError> {
        let config = ApiConfig::resolve(settings)?;

        let agent = Agent::config_builder()
            .timeout_global(config.timeout())
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self { agent, config })
    }

    /// Resolved connection descriptor.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send a request and normalize the response.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure and
    /// [`ConfluenceError::Json`] if a JSON body cannot be serialized.
    pub fn execute(&self, request: &ApiRequest) -> Result<Payload, ConfluenceError> {
        let url = request.url(&self.config);
        let headers = request.headers(&self.config);
        let body = request.encode_body()?;

        debug!("{} {}", request.method(), url);

        let response = match request.method() {
            Method::Get => apply_headers(self.agent.get(&url), &headers).call()?,
            Method::Delete => apply_headers(self.agent.delete(&url), &headers).call()?,
            Method::Post => send(
                apply_headers(self.agent.post(&url), &headers),
                body.as_deref(),
            )?,
            Method::Put => send(
                apply_headers(self.agent.put(&url), &headers),
                body.as_deref(),
            )?,
        };

        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    value.to_str().unwrap_or_default().to_owned(),
                )
            })
            .collect();
        let bytes = response.into_body().read_to_vec()?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        debug!("{} {} -> {}", request.method(), url, status);

        Ok(response::normalize(status, response_headers, text))
    }
}

impl TryFrom<ClientSettings> for ConfluenceClient {
    type Error = ConfigurationError;

    fn try_from(settings: ClientSettings) -> Result<Self, Self::Error> {
        Self::new(settings)
    }
}

fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<WithBody>,
    body: Option<&[u8]>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(bytes) => builder.send(bytes),
        None => builder.send_empty(),
    }
}
