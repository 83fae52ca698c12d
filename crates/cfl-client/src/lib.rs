//! Sync client for the Confluence REST API.
//!
//! Every operation maps onto one HTTP request (two for home-page lookups and
//! parent-less page creation) and returns a [`Payload`]: the parsed JSON
//! document, or the raw response when the server sent no JSON body.
//!
//! # Architecture
//!
//! - [`ClientSettings`] are validated once into an immutable [`ApiConfig`]
//! - each operation builds an [`ApiRequest`], which is plain data
//! - [`ConfluenceClient::execute`] sends it and normalizes the response
//!
//! Version marker 4 ([`LEGACY_API_VERSION`]) targets the Confluence 4
//! prototype API (`/rest/prototype/1`, `.json` resource extension).
//!
//! # Example
//!
//! ```no_run
//! use cfl_client::{ClientSettings, ConfluenceClient, NewPage, Page};
//!
//! let client = ConfluenceClient::new(ClientSettings::new(
//!     "alice",
//!     "api-token",
//!     "https://confluence.example.com",
//! ))?;
//!
//! let created = client
//!     .post_content(&NewPage::new("DOC", "Release notes", "<p>Hello</p>"))?
//!     .error_for_status()?;
//! let page: Page = created.deserialize()?;
//! println!("created page {}", page.id);
//! # Ok::<(), cfl_client::ConfluenceError>(())
//! ```

mod auth;
mod client;
mod error;
mod multipart;
mod request;
mod response;
mod settings;
pub mod types;

pub use client::{ConfluenceClient, NewPage, PageUpdate};
pub use error::{ConfigurationError, ConfluenceError};
pub use multipart::MultipartForm;
pub use request::{ApiRequest, Method, RequestBody};
pub use response::{Payload, RawResponse};
pub use settings::{ApiConfig, ClientSettings, LEGACY_API_VERSION};
pub use types::{Label, Page};
