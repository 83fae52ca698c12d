//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    #[serde(deserialize_with = "super::id_from_string_or_number")]
    pub id: String,
    /// Content type ("page" or "blogpost").
    #[serde(rename = "type", default)]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Owning space, when expanded.
    #[serde(default)]
    pub space: Option<SpaceRef>,
    /// Version information, when expanded.
    #[serde(default)]
    pub version: Option<Version>,
    /// Parent chain, root first, when expanded.
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
    /// Page body content, when expanded.
    #[serde(default)]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Page {
    /// Storage-format markup, if the body was expanded.
    pub fn storage_value(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map(|s| s.value.as_str())
    }

    /// Current version number, if the version was expanded.
    pub fn version_number(&self) -> Option<u32> {
        self.version.as_ref().map(|v| v.number)
    }
}

/// Space reference embedded in content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpaceRef {
    /// Space key.
    pub key: String,
}

/// Ancestor reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Ancestor {
    /// Ancestor page ID.
    #[serde(deserialize_with = "super::id_from_string_or_number")]
    pub id: String,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
    /// Whether watchers were notified.
    #[serde(rename = "minorEdit", default)]
    pub minor_edit: bool,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    /// Markup in the given representation.
    pub value: String,
    /// Content representation ("storage", "wiki", ...).
    pub representation: String,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
    /// API self link.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}
