//! CLI command implementations.

pub(crate) mod attachment;
pub(crate) mod content;
pub(crate) mod label;
pub(crate) mod search;
pub(crate) mod space;

pub(crate) use attachment::AttachmentCommand;
pub(crate) use content::ContentCommand;
pub(crate) use label::LabelCommand;
pub(crate) use search::SearchArgs;
pub(crate) use space::SpaceCommand;

use cfl_client::Payload;

use crate::error::CliError;
use crate::output::Output;

/// Fail on HTTP error statuses, otherwise print the payload.
fn print_checked(output: &Output, payload: Payload) -> Result<Payload, CliError> {
    let payload = payload.error_for_status()?;
    output.payload(&payload)?;
    Ok(payload)
}
