//! `cfl search` command implementation.

use cfl_client::ConfluenceClient;
use clap::Args;

use super::print_checked;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Raw query string, escaped or not (e.g. `cql=space=DOC and type=page&limit=10`).
    query: String,
}

impl SearchArgs {
    pub(crate) fn execute(self, client: &ConfluenceClient, output: &Output) -> Result<(), CliError> {
        print_checked(output, client.search(&self.query)?)?;
        Ok(())
    }
}
