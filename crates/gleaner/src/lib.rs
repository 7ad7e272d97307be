//! Academic paper metadata retrieval and batch PDF downloading.
//!
//! `gleaner` is a library for pulling paper metadata out of arXiv's Atom
//! feed API and downloading the referenced PDF artifacts, providing:
//!
//! - Query construction from a structured search configuration (category,
//!   conjunctive keywords, submission window, result limit)
//! - Typed decoding of feed responses into [`paper::Paper`] records
//! - Batch PDF downloads with per-paper failure isolation
//! - A stable numeric error taxonomy with inspectable cause chains
//!
//! # Getting Started
//!
//! ```no_run
//! use gleaner::{
//!   downloader::PdfDownloader,
//!   fetcher::{ArxivFetcher, FetchConfig},
//!   prelude::*,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GleanerError> {
//!   let cancel = CancellationToken::new();
//!
//!   // Fetch recent papers in a category
//!   let config = FetchConfig {
//!     category: "cs.CR".to_string(),
//!     time_span: Some("last_7_days".to_string()),
//!     ..Default::default()
//!   };
//!   let papers = ArxivFetcher::new().fetch(&cancel, &config).await?;
//!
//!   // Download their PDFs, tolerating per-paper failures
//!   let outcome = PdfDownloader::new("papers").download(&cancel, &papers).await;
//!   println!("{} downloaded, {} failed", outcome.downloaded.len(), outcome.failed.len());
//!
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`paper`]: Core paper metadata types
//! - [`fetcher`]: Query construction and feed decoding
//! - [`downloader`]: Batch PDF retrieval
//! - [`error`]: Error taxonomy with stable numeric codes
//! - [`prelude`]: Common types for ergonomic imports
//!
//! # Design Philosophy
//!
//! This library emphasizes:
//! - Fail-fast validation before any network activity
//! - Per-item failure isolation in batch operations
//! - Cancellation threaded through every outbound request
//! - Clear error handling with classification that survives wrapping

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

pub mod downloader;
pub mod error;
pub mod fetcher;
pub mod paper;

/// Common types for ergonomic imports.
///
/// # Usage
///
/// ```no_run
/// use gleaner::{fetcher::ArxivFetcher, prelude::*};
///
/// # async fn example() -> Result<(), GleanerError> {
/// let fetcher = ArxivFetcher::new();
/// # Ok(())
/// # }
/// ```
pub mod prelude {
  pub use crate::{
    downloader::DownloadOutcome,
    error::{ErrorCode, GleanerError},
    paper::Paper,
  };
}
