//! Subcommands of the resourcehub CLI, one module each.

use resourcehub::{
  error::HubError,
  resource::{License, Rating},
  search::{sort_resources, DateBucket, SearchParams, SortKey, SortOrder},
};

use super::*;

pub mod collections;
pub mod comments;
pub mod download;
pub mod get;
pub mod init;
pub mod like;
pub mod list;
pub mod notifications;
pub mod rate;
pub mod search;

pub use collections::{collections, CollectionCommands};
pub use comments::{comments, CommentCommands};
pub use download::{download, DownloadOptions};
pub use get::{get, GetOptions};
pub use init::{init, InitOptions};
pub use like::{like, LikeOptions};
pub use list::{list, ListOptions};
pub use notifications::{notifications, NotificationCommands};
pub use rate::{rate, RateOptions};
pub use search::{search, SearchOptions};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a configuration file
  Init(InitOptions),

  /// List resources, optionally narrowed by text and category
  List(ListOptions),

  /// Show one resource in detail
  Get(GetOptions),

  /// Advanced search with every marketplace filter
  Search(SearchOptions),

  /// Like a resource, or remove your like
  Like(LikeOptions),

  /// Record a download of a resource
  Download(DownloadOptions),

  /// Rate a resource from 1 to 5 stars, or show its rating
  Rate(RateOptions),

  /// Manage your collections
  Collections {
    /// The collection operation to run
    #[command(subcommand)]
    cmd: CollectionCommands,
  },

  /// Read and write comments
  Comments {
    /// The comment operation to run
    #[command(subcommand)]
    cmd: CommentCommands,
  },

  /// Read and manage your notifications
  Notifications {
    /// The notification operation to run
    #[command(subcommand)]
    cmd: NotificationCommands,
  },
}

/// The commands that run against a [`Hub`], i.e. everything but `init`.
pub enum HubCommand {
  /// See [`Commands::List`]
  List(ListOptions),
  /// See [`Commands::Get`]
  Get(GetOptions),
  /// See [`Commands::Search`]
  Search(SearchOptions),
  /// See [`Commands::Like`]
  Like(LikeOptions),
  /// See [`Commands::Download`]
  Download(DownloadOptions),
  /// See [`Commands::Rate`]
  Rate(RateOptions),
  /// See [`Commands::Collections`]
  Collections(CollectionCommands),
  /// See [`Commands::Comments`]
  Comments(CommentCommands),
  /// See [`Commands::Notifications`]
  Notifications(NotificationCommands),
}

/// Splits `init` off; it writes the configuration the hub is built from.
impl TryFrom<Commands> for HubCommand {
  type Error = InitOptions;

  fn try_from(command: Commands) -> std::result::Result<Self, InitOptions> {
    Ok(match command {
      Commands::Init(options) => return Err(options),
      Commands::List(options) => Self::List(options),
      Commands::Get(options) => Self::Get(options),
      Commands::Search(options) => Self::Search(options),
      Commands::Like(options) => Self::Like(options),
      Commands::Download(options) => Self::Download(options),
      Commands::Rate(options) => Self::Rate(options),
      Commands::Collections { cmd } => Self::Collections(cmd),
      Commands::Comments { cmd } => Self::Comments(cmd),
      Commands::Notifications { cmd } => Self::Notifications(cmd),
    })
  }
}

/// Title of a held resource, falling back to its id.
fn display_name(hub: &Hub, id: &str) -> String {
  hub.get_by_id(id).map_or_else(|| id.to_string(), |r| r.title)
}
