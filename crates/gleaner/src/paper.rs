//! Core paper metadata types.
//!
//! This module provides the data model shared by the fetcher and the
//! downloader:
//!
//! - [`Paper`]: one feed entry's worth of metadata
//! - [`Author`]: a single author with optional institutional details
//! - [`Link`]: an (href, relation, media type) triple
//!
//! Papers are created by the fetcher from remote response data and are
//! immutable afterwards. They live for a single fetch/download cycle; nothing
//! here is persisted.
//!
//! # Examples
//!
//! Selecting a paper's downloadable artifact:
//!
//! ```
//! use gleaner::paper::Paper;
//!
//! # fn example(paper: &Paper) {
//! match paper.pdf_link() {
//!   Some(link) => println!("PDF at: {}", link.href),
//!   None => println!("no downloadable artifact"),
//! }
//! # }
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media type identifying a paper's PDF artifact among its links.
pub const PDF_MIME: &str = "application/pdf";

/// Complete representation of an academic paper's metadata.
///
/// Field order mirrors the feed entries the fetcher decodes: identifier,
/// descriptive text, authors, timestamps, links, and category labels. The
/// `links` sequence preserves feed order, which matters for
/// [`Paper::pdf_link`]'s first-match rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
  /// Canonical identifier, typically a URL-like id such as
  /// `http://arxiv.org/abs/2301.07041v1`
  pub id:         String,
  /// The paper's full title
  pub title:      String,
  /// Abstract or summary text
  pub summary:    String,
  /// Ordered list of paper authors
  pub authors:    Vec<Author>,
  /// Publication timestamp
  pub published:  DateTime<Utc>,
  /// Last-updated timestamp
  pub updated:    DateTime<Utc>,
  /// Ordered list of links associated with the paper
  pub links:      Vec<Link>,
  /// Subject classification labels, e.g. `cs.CR`
  pub categories: Vec<String>,
}

/// Author information for academic papers.
///
/// Sources vary in how much author detail they expose; only the name is
/// guaranteed to be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
  /// Author's full name
  pub name:        String,
  /// Optional institutional affiliation
  pub affiliation: Option<String>,
  /// Optional country
  pub country:     Option<String>,
}

/// A link associated with a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
  /// Target URL
  pub href:       String,
  /// Link relation, e.g. `alternate` or `related`
  pub rel:        String,
  /// Media type of the target, e.g. `application/pdf`
  pub media_type: String,
}

impl Paper {
  /// Returns the first link carrying the PDF media type, if any.
  ///
  /// A paper without such a link has no downloadable artifact.
  pub fn pdf_link(&self) -> Option<&Link> {
    self.links.iter().find(|link| link.media_type == PDF_MIME)
  }

  /// Derives the local filename for this paper's PDF.
  ///
  /// Takes the final `/`-separated segment of the identifier and appends a
  /// `.pdf` suffix, so `http://arxiv.org/abs/2301.07041v1` becomes
  /// `2301.07041v1.pdf`.
  pub fn filename(&self) -> PathBuf {
    let stem = self.id.rsplit('/').next().unwrap_or(&self.id);
    PathBuf::from(format!("{stem}.pdf"))
  }
}
