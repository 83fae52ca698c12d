//! HTTP basic authentication for Confluence.

use std::fmt;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

/// Precomputed `Authorization` header value.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct BasicAuth {
    header: String,
}

impl BasicAuth {
    /// Encode `username:password` per RFC 7617.
    pub(crate) fn new(username: &str, password: &str) -> Self {
        let token = BASE64_STANDARD.encode(format!("{username}:{password}"));
        Self {
            header: format!("Basic {token}"),
        }
    }

    /// Value for the `Authorization` header.
    pub(crate) fn header_value(&self) -> &str {
        &self.header
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicAuth(<redacted>)")
    }
}
