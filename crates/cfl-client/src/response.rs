//! Response normalization.
//!
//! Every operation reduces the transport outcome to one [`Payload`]: the
//! parsed JSON document when the server sent one, otherwise the raw
//! response. HTTP error statuses are not turned into errors here; use
//! [`Payload::error_for_status`] to opt in.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ConfluenceError;

/// Response without a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in received order.
    pub headers: Vec<(String, String)>,
    /// Body text (empty for 204 responses).
    pub body: String,
}

impl RawResponse {
    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON document.
    Json(Value),
    /// Response that carried no JSON body.
    Raw(RawResponse),
}

impl Payload {
    /// The JSON document, if the response had one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Take the JSON document, if the response had one.
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// The raw response, if there was no JSON body.
    pub fn as_raw(&self) -> Option<&RawResponse> {
        match self {
            Self::Json(_) => None,
            Self::Raw(raw) => Some(raw),
        }
    }

    /// Decode the payload into a typed view.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Json`] if the document does not match `T`
    /// or the response had no JSON body.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfluenceError> {
        match self {
            Self::Json(value) => Ok(T::deserialize(value)?),
            Self::Raw(raw) => Ok(serde_json::from_str(&raw.body)?),
        }
    }

    /// Turn error statuses into [`ConfluenceError::HttpResponse`].
    ///
    /// Raw responses are checked by status code. JSON documents are checked
    /// by the `statusCode` field Confluence puts in its error bodies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpResponse`] for statuses of 400 and up.
    pub fn error_for_status(self) -> Result<Self, ConfluenceError> {
        let failure = match &self {
            Self::Raw(raw) if raw.status >= 400 => Some((raw.status, raw.body.clone())),
            Self::Raw(_) => None,
            Self::Json(value) => value
                .get("statusCode")
                .and_then(Value::as_u64)
                .filter(|status| *status >= 400)
                .map(|status| (u16::try_from(status).unwrap_or(u16::MAX), value.to_string())),
        };

        match failure {
            Some((status, body)) => Err(ConfluenceError::HttpResponse { status, body }),
            None => Ok(self),
        }
    }
}

/// Reduce a received response to a [`Payload`].
pub(crate) fn normalize(status: u16, headers: Vec<(String, String)>, body: String) -> Payload {
    if body.trim().is_empty() {
        debug!("Response {status} has no body");
        return Payload::Raw(RawResponse {
            status,
            headers,
            body,
        });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Payload::Json(value),
        Err(e) => {
            debug!("Response {status} body is not JSON: {e}");
            Payload::Raw(RawResponse {
                status,
                headers,
                body,
            })
        }
    }
}
