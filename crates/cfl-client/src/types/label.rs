//! Confluence label types.

use serde::{Deserialize, Serialize};

/// Label prefix used for ordinary user labels.
const GLOBAL_PREFIX: &str = "global";

/// Content label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    /// Namespace ("global", "my", "team").
    pub prefix: String,
    /// Label name.
    pub name: String,
    /// Label ID, present in server responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Label {
    /// Label with an explicit prefix.
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            id: None,
        }
    }

    /// Label in the `global` namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self::new(GLOBAL_PREFIX, name)
    }
}

/// Labels API response.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelsResponse {
    /// Labels on the content.
    pub results: Vec<Label>,
    /// Total count.
    #[serde(default)]
    pub size: usize,
}
