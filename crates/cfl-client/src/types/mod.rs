//! Typed views of Confluence API documents.
//!
//! Operations return [`Payload`](crate::Payload); these types decode it via
//! [`Payload::deserialize`](crate::Payload::deserialize). Only the fields the
//! client and CLI read are modelled.

mod attachment;
mod label;
mod page;
mod space;

pub use attachment::{Attachment, AttachmentsResponse};
pub use label::{Label, LabelsResponse};
pub use page::{Ancestor, Body, Links, Page, SpaceRef, Storage, Version};
pub use space::{Space, SpaceExpandable, SpaceList};

use serde::{Deserialize, Deserializer};

/// Content IDs arrive as strings from most servers and as numbers from some.
pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
