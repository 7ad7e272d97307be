//! Error types for the gleaner library.
//!
//! This module provides the error taxonomy shared by the fetcher and the
//! downloader. Every error carries a stable numeric [`ErrorCode`] so callers
//! can classify failures without matching on concrete variants, and errors
//! that wrap an underlying cause keep that cause reachable through
//! [`std::error::Error::source`].
//!
//! # Examples
//!
//! ```
//! use gleaner::error::{ErrorCode, GleanerError};
//!
//! let inner = GleanerError::MissingPdfLink("http://arxiv.org/abs/2301.07041v1".into());
//! let err = GleanerError::PaperDownload(Box::new(inner));
//!
//! // The wrapper keeps its own code...
//! assert_eq!(err.code(), ErrorCode::PaperDownload);
//! // ...while the wrapped cause stays inspectable through the chain.
//! assert!(err.matches_code(ErrorCode::MissingPdfLink));
//! ```

use thiserror::Error;

/// Error type alias used for the [`gleaner`](crate) crate.
pub type Result<T> = core::result::Result<T, GleanerError>;

/// Stable numeric codes for every error the library can produce.
///
/// Codes are grouped by numeric range:
///
/// - `100xxx` — internal / general
/// - `200xxx` — authentication (reserved)
/// - `300xxx` — authorization (reserved)
/// - `400xxx` — validation / caller input
/// - `500xxx` — infrastructure
/// - `600xxx` — domain-specific
///
/// The concrete values are part of the public contract and must not change
/// between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
  /// Internal error with no more specific classification.
  Internal             = 100_001,
  /// Input parameters are invalid.
  InvalidInput         = 400_001,
  /// A required field is missing.
  MissingRequiredField = 400_002,
  /// Network communication failed.
  Network              = 500_004,
  /// The operation was cancelled before it could complete.
  Cancelled            = 500_005,
  /// The external API returned an error response.
  ExternalApi          = 500_006,
  /// The external API response could not be parsed.
  ExternalApiParsing   = 500_007,
  /// A filesystem operation failed.
  Filesystem           = 500_008,
  /// A paper could not be downloaded.
  PaperDownload        = 600_001,
  /// A paper has no PDF link to download.
  MissingPdfLink       = 600_002,
}

impl ErrorCode {
  /// Returns the stable numeric value of this code.
  pub fn value(self) -> u32 { self as u32 }
}

/// Errors that can occur when fetching paper metadata or downloading PDFs.
///
/// Variants that wrap an underlying failure expose it via
/// [`std::error::Error::source`], so a caller can tell "network down" apart
/// from "bad input" even after wrapping. See [`GleanerError::matches_code`]
/// for chain-aware classification.
#[derive(Error, Debug)]
pub enum GleanerError {
  /// A required configuration field was left empty.
  ///
  /// The parameter names the missing field, e.g. `"category"` when a
  /// [`FetchConfig`](crate::fetcher::FetchConfig) is built without a subject
  /// classification code.
  #[error("required field is missing: {0}")]
  MissingRequiredField(&'static str),

  /// The caller-supplied configuration is invalid as a whole.
  ///
  /// Reported before any network activity, e.g. when neither a time span nor
  /// a positive result limit bounds a fetch.
  #[error("input parameters are invalid: {0}")]
  InvalidInput(String),

  /// A network request failed at the transport level.
  ///
  /// This covers DNS resolution, connection, TLS, and timeout failures from
  /// the underlying HTTP client.
  #[error("network communication failed")]
  Network(#[from] reqwest::Error),

  /// The operation was cancelled through its cancellation token.
  ///
  /// In-flight requests abort promptly when the token fires; the partially
  /// completed work is discarded.
  #[error("operation was cancelled")]
  Cancelled,

  /// The remote API answered with a non-success status.
  #[error("external API returned unexpected status code: {0}")]
  ExternalApi(reqwest::StatusCode),

  /// The remote API response did not conform to the expected feed schema.
  #[error("failed to parse response from external API")]
  ExternalApiParsing(#[source] quick_xml::DeError),

  /// A filesystem operation failed.
  ///
  /// This occurs when creating or writing a destination file fails, e.g. on
  /// permission errors or a missing download directory.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The paper has no link with the PDF media type.
  ///
  /// The parameter is the paper's identifier.
  #[error("paper {0} has no PDF link")]
  MissingPdfLink(String),

  /// A single paper's download failed.
  ///
  /// Wraps the lower-level cause (missing link, network, status, filesystem,
  /// cancellation) so batch callers can classify per-item failures.
  #[error("failed to download paper")]
  PaperDownload(#[source] Box<GleanerError>),
}

impl GleanerError {
  /// Returns the stable [`ErrorCode`] for this error.
  pub fn code(&self) -> ErrorCode {
    match self {
      Self::MissingRequiredField(_) => ErrorCode::MissingRequiredField,
      Self::InvalidInput(_) => ErrorCode::InvalidInput,
      Self::Network(_) => ErrorCode::Network,
      Self::Cancelled => ErrorCode::Cancelled,
      Self::ExternalApi(_) => ErrorCode::ExternalApi,
      Self::ExternalApiParsing(_) => ErrorCode::ExternalApiParsing,
      Self::Path(_) => ErrorCode::Filesystem,
      Self::MissingPdfLink(_) => ErrorCode::MissingPdfLink,
      Self::PaperDownload(_) => ErrorCode::PaperDownload,
    }
  }

  /// Returns true iff this error, or any error it transitively wraps,
  /// carries the given code.
  ///
  /// Classification survives wrapping: a [`GleanerError::PaperDownload`]
  /// around a network failure still matches [`ErrorCode::Network`]. Causes
  /// from outside the taxonomy (reqwest, quick-xml, I/O) stay reachable
  /// through [`std::error::Error::source`] but carry no code of their own.
  pub fn matches_code(&self, code: ErrorCode) -> bool {
    if self.code() == code {
      return true;
    }
    match self {
      Self::PaperDownload(inner) => inner.matches_code(code),
      _ => false,
    }
  }
}
