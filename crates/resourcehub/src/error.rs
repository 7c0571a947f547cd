//! Error types for the resourcehub library.
//!
//! A single error enum covers every failure mode the library surfaces:
//! - Network and HTTP failures at the remote-client boundary
//! - Authentication-required failures raised before any network call
//! - Rejected input (ratings out of range, invalid replies, unknown parameters)
//! - Local storage and configuration failures
//!
//! # Examples
//!
//! ```no_run
//! use resourcehub::{error::HubError, Hub};
//!
//! # async fn example(hub: Hub) -> Result<(), HubError> {
//! match hub.toggle_like("res-1").await {
//!   Err(HubError::Unauthenticated) => println!("Sign in to like resources"),
//!   Err(HubError::Http { status, .. }) => println!("Backend answered {status}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(()) => println!("Done!"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`resourcehub`](crate) crate.
pub type Result<T> = core::result::Result<T, HubError>;

/// Errors that can occur when working with the resourcehub library.
#[derive(Error, Debug)]
pub enum HubError {
  /// A network request failed before a response was received.
  ///
  /// This can occur when:
  /// - The backend is unreachable
  /// - The request times out
  /// - TLS errors occur
  /// - The response body is not the JSON we expected
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The backend answered with a non-success status code.
  ///
  /// The backend has no structured error schema, so only the status and the
  /// requested URL are kept.
  #[error("HTTP error! status: {status} ({url})")]
  Http {
    /// HTTP status code of the response
    status: u16,
    /// URL that was requested
    url:    String,
  },

  /// The operation needs a signed-in user and there is none.
  ///
  /// Raised synchronously, before any request is sent.
  #[error("User not authenticated")]
  Unauthenticated,

  /// The same mutation is already running for this id.
  #[error("A {mutation} request for \"{id}\" is already in flight")]
  MutationInFlight {
    /// Name of the mutation (e.g. `like`)
    mutation: &'static str,
    /// Id the mutation targets
    id:       String,
  },

  /// Ratings must be whole stars from 1 to 5.
  #[error("Rating must be between 1 and 5, got {0}")]
  InvalidRating(u8),

  /// A reply must point at an existing top-level comment on the same resource.
  #[error("Comment \"{parent_id}\" is not a top-level comment that can be replied to")]
  InvalidReply {
    /// The rejected parent id
    parent_id: String,
  },

  /// A search or sort parameter could not be parsed.
  #[error("Invalid parameter: {0}")]
  InvalidParameter(String),

  /// A SQLite operation on the local cache failed.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// An async SQLite operation on the local cache failed.
  #[error(transparent)]
  AsyncSqlite(#[from] tokio_rusqlite::Error),

  /// A cached value could not be (de)serialized.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The configured base URL is not a valid URL.
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// Configuration could not be loaded.
  #[error(transparent)]
  Config(#[from] config::ConfigError),

  /// Configuration could not be written out as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),
}
