//! Confluence space types.

use serde::Deserialize;

/// Space lookup response (`GET /space?spaceKey=...`).
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceList {
    /// Matching spaces.
    pub results: Vec<Space>,
    /// Result count.
    #[serde(default)]
    pub size: usize,
}

/// Confluence space.
#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    /// Space key.
    #[serde(default)]
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Links to fields that were not expanded.
    #[serde(rename = "_expandable", default)]
    pub expandable: Option<SpaceExpandable>,
}

/// Unexpanded space fields, as links relative to the base URL.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceExpandable {
    /// Link to the space home page.
    #[serde(default)]
    pub homepage: Option<String>,
}
