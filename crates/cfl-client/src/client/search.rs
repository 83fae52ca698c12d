//! CQL search.

use percent_encoding::percent_decode_str;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::request::ApiRequest;
use crate::response::Payload;

impl ConfluenceClient {
    /// Run a search with a raw query string, e.g. `cql=type=page&limit=10`.
    ///
    /// The query may be escaped or not: each `key=value` pair is decoded and
    /// re-encoded before sending. `+` is kept as a literal plus sign.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn search(&self, raw_query: &str) -> Result<Payload, ConfluenceError> {
        info!("Searching: {}", raw_query);
        self.execute(&search_request(raw_query))
    }
}

fn search_request(raw_query: &str) -> ApiRequest {
    parse_query(raw_query)
        .into_iter()
        .fold(ApiRequest::get(&["search"]), |request, (key, value)| {
            request.query(key, value)
        })
}

/// Split a raw query string into decoded pairs.
///
/// Only the first `=` of each pair separates key from value, so CQL such as
/// `cql=type=page` survives. A pair without `=` has an empty value.
fn parse_query(raw_query: &str) -> Vec<(String, String)> {
    raw_query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}
