//! Error types for the gleaner CLI.
//!
//! Wraps the library's error type together with the failure modes the CLI
//! itself can hit (filesystem setup, user interaction, JSON output).

use gleaner::error::GleanerError;
use thiserror::Error;

/// Error type alias used for the CLI.
pub type Result<T> = core::result::Result<T, GleanerdError>;

/// Errors that can occur while running CLI commands.
#[derive(Error, Debug)]
pub enum GleanerdError {
  /// An error bubbled up from the gleaner library.
  #[error(transparent)]
  Gleaner(#[from] GleanerError),

  /// A filesystem operation failed, e.g. creating the download directory.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A user interaction prompt failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Serializing output to JSON failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// Every paper in the batch failed to download.
  #[error("all {0} downloads failed")]
  AllDownloadsFailed(usize),
}
