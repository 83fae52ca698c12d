//! Space lookup and home-page resolution.

use serde_json::Value;
use tracing::{info, warn};

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::request::ApiRequest;
use crate::response::Payload;

impl ConfluenceClient {
    /// Get a space by key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] on transport failure.
    pub fn get_space(&self, space_key: &str) -> Result<Payload, ConfluenceError> {
        info!("Getting space {}", space_key);
        self.execute(&get_space_request(space_key))
    }

    /// Get the home page of a space.
    ///
    /// Looks the space up first, then follows the home-page link from the
    /// first result. The second request is never sent if the first one fails
    /// or carries no link.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpRequest`] if either request fails and
    /// [`ConfluenceError::HomePageNotFound`] if the space response has no
    /// usable home-page link.
    pub fn get_space_home_page(&self, space_key: &str) -> Result<Payload, ConfluenceError> {
        info!("Getting home page of space {}", space_key);

        let space = self.execute(&get_space_request(space_key))?;
        let link = home_page_link(space).inspect_err(|e| {
            warn!("Space {} has no home page: {}", space_key, e);
        })?;

        self.execute(&ApiRequest::follow(&link))
    }
}

fn get_space_request(space_key: &str) -> ApiRequest {
    ApiRequest::get(&["space"]).query("spaceKey", space_key)
}

/// Extract `results[0]._expandable.homepage` from a space lookup.
///
/// # Errors
///
/// Returns [`ConfluenceError::HomePageNotFound`] carrying the payload when
/// the link is absent, not a string, or not an absolute path.
pub(crate) fn home_page_link(space: Payload) -> Result<String, ConfluenceError> {
    let link = {
        let first = space
            .as_json()
            .and_then(|v| v.get("results"))
            .and_then(Value::as_array)
            .and_then(|results| results.first());

        match first {
            None => Err("space lookup returned no results"),
            Some(space) => match space.pointer("/_expandable/homepage") {
                None | Some(Value::Null) => Err("space has no home page link"),
                Some(Value::String(link)) if link.starts_with('/') => Ok(link.clone()),
                Some(_) => Err("home page link is not an absolute path"),
            },
        }
    };

    link.map_err(|reason| not_found(reason, space))
}

/// Extract the `id` of a content document, accepting string or number.
///
/// # Errors
///
/// Returns [`ConfluenceError::HomePageNotFound`] carrying the payload when
/// there is no usable `id`.
pub(crate) fn page_id(page: Payload) -> Result<String, ConfluenceError> {
    let id = match page.as_json().and_then(|v| v.get("id")) {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    };

    id.ok_or_else(|| not_found("home page has no id", page))
}

fn not_found(reason: &str, response: Payload) -> ConfluenceError {
    ConfluenceError::HomePageNotFound {
        reason: reason.to_owned(),
        response: Box::new(response),
    }
}
