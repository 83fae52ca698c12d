//! `cfl space` commands.

use cfl_client::ConfluenceClient;
use clap::Subcommand;

use super::print_checked;
use crate::error::CliError;
use crate::output::Output;

/// Space commands.
#[derive(Subcommand)]
pub(crate) enum SpaceCommand {
    /// Look up a space by key.
    Get {
        /// Space key.
        key: String,
    },
    /// Get the home page of a space.
    Home {
        /// Space key.
        key: String,
    },
}

impl SpaceCommand {
    pub(crate) fn execute(self, client: &ConfluenceClient, output: &Output) -> Result<(), CliError> {
        let payload = match self {
            Self::Get { key } => client.get_space(&key)?,
            Self::Home { key } => client.get_space_home_page(&key)?,
        };
        print_checked(output, payload)?;
        Ok(())
    }
}
