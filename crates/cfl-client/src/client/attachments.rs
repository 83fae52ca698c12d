//! Attachment operations for Confluence API.

use std::path::Path;

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::multipart::MultipartForm;
use crate::request::ApiRequest;
use crate::response::Payload;

/// Form field Confluence reads uploaded files from.
const FILE_FIELD: &str = "file";

impl ConfluenceClient {
    /// List attachments on a page, with version and container expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn get_attachments(&self, space_key: &str, id: &str) -> Result<Payload, ConfluenceError> {
        info!("Getting attachments for page {}", id);
        self.execute(&list_attachments_request(space_key, id))
    }

    /// Upload a file as a new attachment of a page.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Io`] if the file cannot be read (no request
    /// is sent) and [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn create_attachment(
        &self,
        space_key: &str,
        id: &str,
        file_path: &Path,
    ) -> Result<Payload, ConfluenceError> {
        let form = MultipartForm::new().file_from_path(FILE_FIELD, file_path)?;
        info!(
            "Uploading new attachment '{}' to page {} in space {}",
            file_path.display(),
            id,
            space_key
        );
        self.execute(&ApiRequest::post(&["content", id, "child", "attachment"]).multipart(form))
    }

    /// Replace the data of an existing attachment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Io`] if the file cannot be read (no request
    /// is sent) and [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn update_attachment_data(
        &self,
        space_key: &str,
        id: &str,
        attachment_id: &str,
        file_path: &Path,
    ) -> Result<Payload, ConfluenceError> {
        let form = MultipartForm::new().file_from_path(FILE_FIELD, file_path)?;
        info!(
            "Updating attachment {} on page {} in space {} with '{}'",
            attachment_id,
            id,
            space_key,
            file_path.display()
        );
        self.execute(&update_attachment_request(id, attachment_id, form))
    }
}

fn list_attachments_request(space_key: &str, id: &str) -> ApiRequest {
    ApiRequest::get(&["content", id, "child", "attachment"])
        .query("spaceKey", space_key)
        .query("expand", "version,container")
}

fn update_attachment_request(id: &str, attachment_id: &str, form: MultipartForm) -> ApiRequest {
    ApiRequest::post(&["content", id, "child", "attachment", attachment_id, "data"])
        .multipart(form)
}
