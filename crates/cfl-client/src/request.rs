//! Request descriptions built by each client operation.
//!
//! An [`ApiRequest`] is plain data: method, resource path, query parameters
//! and body. The URL and headers are rendered against an [`ApiConfig`] only
//! when the request is sent, so every operation can be checked without a
//! network round-trip.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::multipart::MultipartForm;
use crate::settings::ApiConfig;

/// Unreserved characters (RFC 3986): A-Z a-z 0-9 - . _ ~
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Unreserved characters plus `,`, which Confluence uses to separate
/// `expand` entries.
const QUERY_ENCODE_SET: &AsciiSet = &PATH_SEGMENT_ENCODE_SET.remove(b',');

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Uppercase method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document.
    Json(Value),
    /// `multipart/form-data` file upload.
    Multipart(MultipartForm),
}

/// Where the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// Resource under the API prefix, one entry per path segment.
    Resource(Vec<String>),
    /// Server-supplied absolute path, used verbatim.
    Link(String),
}

/// One API call, described as data.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    target: Target,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl ApiRequest {
    fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            target: Target::Resource(segments.iter().map(|s| (*s).to_owned()).collect()),
            query: Vec::new(),
            body: None,
        }
    }

    /// GET a resource under the API prefix.
    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::Get, segments)
    }

    /// POST to a resource under the API prefix.
    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::Post, segments)
    }

    /// PUT to a resource under the API prefix.
    pub fn put(segments: &[&str]) -> Self {
        Self::new(Method::Put, segments)
    }

    /// DELETE a resource under the API prefix.
    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::Delete, segments)
    }

    /// GET a link returned by the server, relative to the base URL.
    pub fn follow(link: &str) -> Self {
        Self {
            method: Method::Get,
            target: Target::Link(link.to_owned()),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter. Parameters keep insertion order.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Attach a multipart form body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Query parameters in insertion order, not yet encoded.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Request body, if any.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Render the full request URL.
    ///
    /// Resources: base URL + API path + encoded segments + extension + query.
    /// Links: base URL + link path + extension + the link's own query, then
    /// any added parameters.
    pub fn url(&self, config: &ApiConfig) -> String {
        let mut url = config.base_url().to_owned();
        let mut has_query = false;

        match &self.target {
            Target::Resource(segments) => {
                url.push_str(config.api_path());
                for segment in segments {
                    url.push('/');
                    url.extend(utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET));
                }
                url.push_str(config.extension());
            }
            Target::Link(link) => {
                let (path, link_query) = match link.split_once('?') {
                    Some((path, query)) => (path, Some(query)),
                    None => (link.as_str(), None),
                };
                url.push_str(path);
                url.push_str(config.extension());
                if let Some(query) = link_query.filter(|q| !q.is_empty()) {
                    url.push('?');
                    url.push_str(query);
                    has_query = true;
                }
            }
        }

        for (key, value) in &self.query {
            url.push(if has_query { '&' } else { '?' });
            has_query = true;
            url.extend(utf8_percent_encode(key, QUERY_ENCODE_SET));
            url.push('=');
            url.extend(utf8_percent_encode(value, QUERY_ENCODE_SET));
        }

        url
    }

    /// Headers sent with the request, authentication included.
    pub fn headers(&self, config: &ApiConfig) -> Vec<(String, String)> {
        let mut headers = vec![
            (
                "Authorization".to_owned(),
                config.auth().header_value().to_owned(),
            ),
            ("Accept".to_owned(), "application/json".to_owned()),
        ];

        match &self.body {
            Some(RequestBody::Json(_)) => {
                headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
            }
            Some(RequestBody::Multipart(form)) => {
                headers.push(("Content-Type".to_owned(), form.content_type()));
                // Confluence rejects non-browser multipart posts without it
                headers.push(("X-Atlassian-Token".to_owned(), "nocheck".to_owned()));
            }
            None => {}
        }

        headers
    }

    /// Serialize the body for the wire.
    pub(crate) fn encode_body(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        match &self.body {
            Some(RequestBody::Json(value)) => serde_json::to_vec(value).map(Some),
            Some(RequestBody::Multipart(form)) => Ok(Some(form.to_bytes())),
            None => Ok(None),
        }
    }
}
