//! Label operations.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::request::ApiRequest;
use crate::response::Payload;
use crate::types::Label;

impl ConfluenceClient {
    /// List labels on content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn get_labels(&self, id: &str) -> Result<Payload, ConfluenceError> {
        info!("Getting labels for page {}", id);
        self.execute(&ApiRequest::get(&["content", id, "label"]))
    }

    /// Add labels to content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Json`] if the labels cannot be serialized
    /// and [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn post_labels(&self, id: &str, labels: &[Label]) -> Result<Payload, ConfluenceError> {
        info!("Adding {} labels to page {}", labels.len(), id);
        self.execute(&add_labels_request(id, labels)?)
    }

    /// Remove a label from content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn delete_label(&self, id: &str, name: &str) -> Result<Payload, ConfluenceError> {
        info!("Removing label '{}' from page {}", name, id);
        self.execute(&remove_label_request(id, name))
    }
}

fn remove_label_request(id: &str, name: &str) -> ApiRequest {
    ApiRequest::delete(&["content", id, "label"]).query("name", name)
}

fn add_labels_request(id: &str, labels: &[Label]) -> Result<ApiRequest, serde_json::Error> {
    Ok(ApiRequest::post(&["content", id, "label"]).json(serde_json::to_value(labels)?))
}
