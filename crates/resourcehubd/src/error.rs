//! Error types for the resourcehub command line.

use resourcehub::error::HubError;
use thiserror::Error;

/// Error type alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, ResourcehubdError>;

/// Everything that can stop a CLI command.
#[derive(Error, Debug)]
pub enum ResourcehubdError {
  /// Failure reported by the library
  #[error(transparent)]
  Hub(#[from] HubError),

  /// A prompt could not be shown or answered
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),

  /// Terminal or file system failure
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The requested item does not exist
  #[error("{0} not found")]
  NotFound(String),
}
