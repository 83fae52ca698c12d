//! cfl - Confluence REST API from the command line.
//!
//! Provides commands for:
//! - `space`: Look up spaces and their home pages
//! - `content`: Read, create, update and delete pages
//! - `attachment`: List and upload page attachments
//! - `label`: List, add and remove labels
//! - `search`: Run CQL searches

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use cfl_client::{ClientSettings, ConfluenceClient};
use cfl_config::{CliSettings, Config};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{AttachmentCommand, ContentCommand, LabelCommand, SearchArgs, SpaceCommand};
use error::CliError;
use output::Output;

/// cfl - Confluence REST API client.
#[derive(Parser)]
#[command(name = "cfl", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover cfl.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Confluence base URL (overrides config).
    #[arg(long, env = "CONFLUENCE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Confluence username (overrides config).
    #[arg(short, long, env = "CONFLUENCE_USERNAME", global = true)]
    username: Option<String>,

    /// Confluence password or API token (overrides config).
    #[arg(
        short,
        long,
        env = "CONFLUENCE_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    password: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Space commands.
    #[command(subcommand)]
    Space(SpaceCommand),
    /// Content (page) commands.
    #[command(subcommand)]
    Content(ContentCommand),
    /// Attachment commands.
    #[command(subcommand)]
    Attachment(AttachmentCommand),
    /// Label commands.
    #[command(subcommand)]
    Label(LabelCommand),
    /// Search with a raw query string, e.g. `cql=type=page`.
    Search(SearchArgs),
}

impl Cli {
    /// Load configuration and build a client.
    fn connect(&self) -> Result<ConfluenceClient, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            debug!("Loaded config from {}", path.display());
        }
        let confluence = config.require_confluence()?;

        let client = ConfluenceClient::new(ClientSettings::from(confluence))?;
        info!("Using Confluence at {}", client.config().base_url());
        Ok(client)
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    let client = cli.connect()?;

    match cli.command {
        Commands::Space(cmd) => cmd.execute(&client, output),
        Commands::Content(cmd) => cmd.execute(&client, output),
        Commands::Attachment(cmd) => cmd.execute(&client, output),
        Commands::Label(cmd) => cmd.execute(&client, output),
        Commands::Search(args) => args.execute(&client, output),
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
