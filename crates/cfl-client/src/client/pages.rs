//! Content (page) operations.

use serde_json::{Value, json};
use tracing::info;

use super::space::page_id;
use super::{ConfluenceClient, DEFAULT_CONTENT_EXPAND};
use crate::error::ConfluenceError;
use crate::request::ApiRequest;
use crate::response::Payload;

/// Default body representation.
const STORAGE_REPRESENTATION: &str = "storage";

/// Content type of every page this client creates or updates.
const PAGE_TYPE: &str = "page";

/// Page to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    /// Key of the space to create the page in.
    pub space_key: String,
    /// Page title.
    pub title: String,
    /// Page body markup.
    pub body: String,
    /// Parent page. The space home page is used when `None`.
    pub parent_id: Option<String>,
    /// Body representation. `storage` when `None`.
    pub representation: Option<String>,
}

impl NewPage {
    pub fn new(
        space_key: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            space_key: space_key.into(),
            title: title.into(),
            body: body.into(),
            parent_id: None,
            representation: None,
        }
    }

    #[must_use]
    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn representation(mut self, representation: impl Into<String>) -> Self {
        self.representation = Some(representation.into());
        self
    }
}

/// Replacement content for an existing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUpdate {
    /// Key of the space holding the page.
    pub space_key: String,
    /// Page ID.
    pub id: String,
    /// New version number, sent as given. Confluence expects the current
    /// version plus one.
    pub version: u32,
    /// Page title.
    pub title: String,
    /// Page body markup.
    pub body: String,
    /// Suppress watcher notifications. `false` when `None`.
    pub minor_edit: Option<bool>,
    /// Body representation. `storage` when `None`.
    pub representation: Option<String>,
}

impl PageUpdate {
    pub fn new(
        space_key: impl Into<String>,
        id: impl Into<String>,
        version: u32,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            space_key: space_key.into(),
            id: id.into(),
            version,
            title: title.into(),
            body: body.into(),
            minor_edit: None,
            representation: None,
        }
    }

    #[must_use]
    pub fn minor_edit(mut self, minor_edit: bool) -> Self {
        self.minor_edit = Some(minor_edit);
        self
    }

    #[must_use]
    pub fn representation(mut self, representation: impl Into<String>) -> Self {
        self.representation = Some(representation.into());
        self
    }
}

impl ConfluenceClient {
    /// Get content by ID with body and version expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn get_content_by_id(&self, id: &str) -> Result<Payload, ConfluenceError> {
        info!("Getting page {}", id);
        self.execute(&get_content_request(id, None))
    }

    /// Get content by ID with a caller-chosen `expand` list.
    ///
    /// `None` expands body and version. An empty list sends an empty
    /// `expand` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn get_custom_content_by_id(
        &self,
        id: &str,
        expanders: Option<&[&str]>,
    ) -> Result<Payload, ConfluenceError> {
        info!("Getting page {} with custom expansion", id);
        self.execute(&get_content_request(id, expanders))
    }

    /// Find content in a space by exact title.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn get_content_by_page_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Payload, ConfluenceError> {
        info!("Getting page '{}' in space {}", title, space_key);
        self.execute(&find_content_request(space_key, title))
    }

    /// Create a page.
    ///
    /// Without a parent ID the space home page is looked up first and used
    /// as the parent; if that lookup fails, nothing is created.
    ///
    /// Creation is not idempotent: retrying after a transport error may
    /// create a duplicate page.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure and
    /// [`ConfluenceError::HomePageNotFound`] if no parent could be resolved.
    pub fn post_content(&self, page: &NewPage) -> Result<Payload, ConfluenceError> {
        let parent_id = match &page.parent_id {
            Some(id) => id.clone(),
            None => {
                let home = self.get_space_home_page(&page.space_key)?;
                page_id(home)?
            }
        };

        info!(
            "Creating page '{}' in space {} under {}",
            page.title, page.space_key, parent_id
        );
        self.execute(&create_page_request(page, &parent_id))
    }

    /// Replace a page's title and body.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn put_content(&self, update: &PageUpdate) -> Result<Payload, ConfluenceError> {
        info!("Updating page {} to version {}", update.id, update.version);
        self.execute(&update_page_request(update))
    }

    /// Delete content by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn delete_content(&self, id: &str) -> Result<Payload, ConfluenceError> {
        info!("Deleting page {}", id);
        self.execute(&ApiRequest::delete(&["content", id]))
    }
}

fn get_content_request(id: &str, expanders: Option<&[&str]>) -> ApiRequest {
    let expand = expanders.map_or_else(|| DEFAULT_CONTENT_EXPAND.to_owned(), |e| e.join(","));
    ApiRequest::get(&["content", id]).query("expand", expand)
}

fn find_content_request(space_key: &str, title: &str) -> ApiRequest {
    ApiRequest::get(&["content"])
        .query("spaceKey", space_key)
        .query("title", title)
        .query("expand", DEFAULT_CONTENT_EXPAND)
}

fn create_page_request(page: &NewPage, parent_id: &str) -> ApiRequest {
    ApiRequest::post(&["content"]).json(json!({
        "type": PAGE_TYPE,
        "title": page.title,
        "space": {"key": page.space_key},
        "ancestors": [{"type": PAGE_TYPE, "id": parent_id}],
        "body": storage_body(&page.body, page.representation.as_deref()),
    }))
}

fn update_page_request(update: &PageUpdate) -> ApiRequest {
    ApiRequest::put(&["content", &update.id])
        .query("expand", DEFAULT_CONTENT_EXPAND)
        .json(json!({
            "id": update.id,
            "type": PAGE_TYPE,
            "title": update.title,
            "space": {"key": update.space_key},
            "version": {
                "number": update.version,
                "minorEdit": update.minor_edit.unwrap_or(false),
            },
            "body": storage_body(&update.body, update.representation.as_deref()),
        }))
}

fn storage_body(value: &str, representation: Option<&str>) -> Value {
    json!({
        "storage": {
            "value": value,
            "representation": representation.unwrap_or(STORAGE_REPRESENTATION),
        }
    })
}
