//! `cfl content` commands.

use std::path::PathBuf;

use cfl_client::{ConfluenceClient, NewPage, Page, PageUpdate};
use clap::{Args, Subcommand};

use super::print_checked;
use crate::error::CliError;
use crate::output::Output;

/// Content (page) commands.
#[derive(Subcommand)]
pub(crate) enum ContentCommand {
    /// Get a page by ID.
    Get {
        /// Page ID.
        id: String,
        /// Comma-separated fields to expand (default: body.storage,version).
        #[arg(long, value_delimiter = ',')]
        expand: Option<Vec<String>>,
    },
    /// Find a page by space and title.
    Find {
        /// Space key.
        #[arg(long)]
        space: String,
        /// Exact page title.
        #[arg(long)]
        title: String,
    },
    /// Create a page from a file.
    Create(CreateArgs),
    /// Replace a page's title and body from a file.
    Update(UpdateArgs),
    /// Delete a page.
    Delete {
        /// Page ID.
        id: String,
    },
}

/// Arguments for the content create command.
#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Space key.
    #[arg(long)]
    space: String,
    /// Page title.
    #[arg(long)]
    title: String,
    /// File holding the page body.
    #[arg(long)]
    file: PathBuf,
    /// Parent page ID (default: the space home page).
    #[arg(long)]
    parent: Option<String>,
    /// Body representation (default: storage).
    #[arg(long)]
    representation: Option<String>,
}

/// Arguments for the content update command.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Space key.
    #[arg(long)]
    space: String,
    /// Page ID.
    #[arg(long)]
    id: String,
    /// New version number (current version plus one).
    #[arg(long)]
    version: u32,
    /// Page title.
    #[arg(long)]
    title: String,
    /// File holding the page body.
    #[arg(long)]
    file: PathBuf,
    /// Do not notify watchers.
    #[arg(long)]
    minor_edit: bool,
    /// Body representation (default: storage).
    #[arg(long)]
    representation: Option<String>,
}

impl ContentCommand {
    pub(crate) fn execute(self, client: &ConfluenceClient, output: &Output) -> Result<(), CliError> {
        match self {
            Self::Get { id, expand } => {
                let payload = match expand {
                    Some(fields) => {
                        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                        client.get_custom_content_by_id(&id, Some(fields.as_slice()))?
                    }
                    None => client.get_content_by_id(&id)?,
                };
                print_checked(output, payload)?;
            }
            Self::Find { space, title } => {
                print_checked(output, client.get_content_by_page_title(&space, &title)?)?;
            }
            Self::Create(args) => args.execute(client, output)?,
            Self::Update(args) => args.execute(client, output)?,
            Self::Delete { id } => {
                print_checked(output, client.delete_content(&id)?)?;
                output.success(&format!("Deleted page {id}"));
            }
        }
        Ok(())
    }
}

impl CreateArgs {
    fn into_page(self) -> Result<NewPage, CliError> {
        let body = std::fs::read_to_string(&self.file)?;
        let mut page = NewPage::new(self.space, self.title, body);
        page.parent_id = self.parent;
        page.representation = self.representation;
        Ok(page)
    }

    fn execute(self, client: &ConfluenceClient, output: &Output) -> Result<(), CliError> {
        let page = self.into_page()?;
        let created: Page = print_checked(output, client.post_content(&page)?)?.deserialize()?;
        output.success(&format!("Created page '{}' (ID: {})", created.title, created.id));
        Ok(())
    }
}

impl UpdateArgs {
    fn into_update(self) -> Result<PageUpdate, CliError> {
        let body = std::fs::read_to_string(&self.file)?;
        let mut update = PageUpdate::new(self.space, self.id, self.version, self.title, body)
            .minor_edit(self.minor_edit);
        update.representation = self.representation;
        Ok(update)
    }

    fn execute(self, client: &ConfluenceClient, output: &Output) -> Result<(), CliError> {
        let update = self.into_update()?;
        let updated: Page = print_checked(output, client.put_content(&update)?)?.deserialize()?;
        output.success(&format!(
            "Updated page '{}' to version {}",
            updated.title,
            updated.version_number().unwrap_or(update.version)
        ));
        Ok(())
    }
}
