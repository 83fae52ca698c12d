//! Confluence attachment types.

use serde::Deserialize;

/// Confluence attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    #[serde(deserialize_with = "super::id_from_string_or_number")]
    pub id: String,
    /// Attachment title/filename.
    pub title: String,
    /// Content type (always "attachment").
    #[serde(rename = "type", default)]
    pub content_type: String,
}

/// Attachments API response.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsResponse {
    /// List of attachments.
    pub results: Vec<Attachment>,
    /// Total count.
    #[serde(default)]
    pub size: usize,
}
