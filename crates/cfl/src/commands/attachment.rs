//! `cfl attachment` commands.

use std::path::PathBuf;

use cfl_client::ConfluenceClient;
use cfl_client::types::AttachmentsResponse;
use clap::Subcommand;

use super::print_checked;
use crate::error::CliError;
use crate::output::Output;

/// Attachment commands.
#[derive(Subcommand)]
pub(crate) enum AttachmentCommand {
    /// List attachments on a page.
    List {
        /// Space key.
        #[arg(long)]
        space: String,
        /// Page ID.
        #[arg(long)]
        page: String,
    },
    /// Upload a file, or replace the data of an existing attachment.
    Upload {
        /// Space key.
        #[arg(long)]
        space: String,
        /// Page ID.
        #[arg(long)]
        page: String,
        /// File to upload.
        file: PathBuf,
        /// Existing attachment to replace instead of creating a new one.
        #[arg(long)]
        attachment_id: Option<String>,
    },
}

impl AttachmentCommand {
    pub(crate) fn execute(self, client: &ConfluenceClient, output: &Output) -> Result<(), CliError> {
        match self {
            Self::List { space, page } => {
                let listed: AttachmentsResponse =
                    print_checked(output, client.get_attachments(&space, &page)?)?.deserialize()?;
                output.info(&format!("{} attachment(s) on page {page}", listed.size));
            }
            Self::Upload {
                space,
                page,
                file,
                attachment_id: Some(attachment_id),
            } => {
                print_checked(
                    output,
                    client.update_attachment_data(&space, &page, &attachment_id, &file)?,
                )?;
                output.success(&format!(
                    "Updated attachment {attachment_id} from {}",
                    file.display()
                ));
            }
            Self::Upload {
                space,
                page,
                file,
                attachment_id: None,
            } => {
                print_checked(output, client.create_attachment(&space, &page, &file)?)?;
                output.success(&format!("Uploaded {} to page {page}", file.display()));
            }
        }
        Ok(())
    }
}
