//! Command line interface for the ResourceHub design-resource marketplace.
//!
//! This crate provides a CLI over the `resourcehub` library. It supports:
//! - Browsing, looking up and searching resources (with an offline fallback catalog)
//! - Liking, downloading and rating resources
//! - Managing collections, comments and notifications
//!
//! # Usage
//!
//! ```bash
//! # Write a configuration file pointing at your backend
//! resourcehub init --api-base-url https://hub.example/api
//!
//! # Browse and search
//! resourcehub list --category fonts
//! resourcehub search --query sans --license free --sort popular
//!
//! # Act as a signed-in user
//! resourcehub --user user-1 like res-1
//! resourcehub --user user-1 collections create "Moodboard"
//! ```
//!
//! Identity comes from the external auth provider; pass its user id with `--user` or
//! `RESOURCEHUB_USER`. Use `-v` (repeatable) for more logging detail.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use resourcehub::{session::User, Config, Hub};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Browse and collect ResourceHub design resources")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default
  /// platform-specific config directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Id of the signed-in user, as issued by the auth provider
  #[arg(long, short, global = true, env = "RESOURCEHUB_USER")]
  user: Option<String>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` overrides the level when set.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Runs the parsed command.
async fn run(cli: Cli, terminal: &Terminal) -> Result<()> {
  let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
  trace!("Using configuration at {}", config_path.display());

  let command = match HubCommand::try_from(cli.command) {
    Ok(command) => command,
    Err(options) => return init(terminal, &config_path, options).await,
  };

  let config = Config::load(Some(&config_path))?;
  debug!("Talking to {}", config.api_base_url);
  let hub = Hub::builder().with_config(config).build().await?;
  if let Some(uid) = cli.user {
    hub.sign_in(User::new(uid)).await;
  }

  match command {
    HubCommand::List(options) => list(terminal, &hub, options).await,
    HubCommand::Get(options) => get(terminal, &hub, options).await,
    HubCommand::Search(options) => search(terminal, &hub, options).await,
    HubCommand::Like(options) => like(terminal, &hub, options).await,
    HubCommand::Download(options) => download(terminal, &hub, options).await,
    HubCommand::Rate(options) => rate(terminal, &hub, options).await,
    HubCommand::Collections(cmd) => collections(terminal, &hub, cmd).await,
    HubCommand::Comments(cmd) => comments(terminal, &hub, cmd).await,
    HubCommand::Notifications(cmd) => notifications(terminal, &hub, cmd).await,
  }
}

/// Entry point for the resourcehub CLI application
///
/// Parses arguments, sets up logging and runs the requested command. Errors are
/// printed to stderr and turn into a non-zero exit code.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let terminal = Terminal { accept_defaults: cli.accept_defaults };
  if let Err(e) = run(cli, &terminal).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    std::process::exit(1);
  }
}
