//! `cfl label` commands.

use cfl_client::types::LabelsResponse;
use cfl_client::{ConfluenceClient, Label};
use clap::Subcommand;

use super::print_checked;
use crate::error::CliError;
use crate::output::Output;

/// Label commands.
#[derive(Subcommand)]
pub(crate) enum LabelCommand {
    /// List labels on a page.
    List {
        /// Page ID.
        id: String,
    },
    /// Add labels to a page.
    Add {
        /// Page ID.
        id: String,
        /// Label names.
        #[arg(required = true)]
        names: Vec<String>,
        /// Label prefix.
        #[arg(long, default_value = "global")]
        prefix: String,
    },
    /// Remove a label from a page.
    Remove {
        /// Page ID.
        id: String,
        /// Label name.
        name: String,
    },
}

impl LabelCommand {
    pub(crate) fn execute(self, client: &ConfluenceClient, output: &Output) -> Result<(), CliError> {
        match self {
            Self::List { id } => {
                let labels: LabelsResponse =
                    print_checked(output, client.get_labels(&id)?)?.deserialize()?;
                output.info(&format!("{} label(s) on page {id}", labels.results.len()));
            }
            Self::Add { id, names, prefix } => {
                let labels = to_labels(&prefix, names);
                print_checked(output, client.post_labels(&id, &labels)?)?;
                output.success(&format!("Added {} label(s) to page {id}", labels.len()));
            }
            Self::Remove { id, name } => {
                print_checked(output, client.delete_label(&id, &name)?)?;
                output.success(&format!("Removed label '{name}' from page {id}"));
            }
        }
        Ok(())
    }
}

fn to_labels(prefix: &str, names: Vec<String>) -> Vec<Label> {
    names
        .into_iter()
        .map(|name| Label::new(prefix, name))
        .collect()
}
