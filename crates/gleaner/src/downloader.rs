//! Batch PDF retrieval for fetched papers.
//!
//! This module maps a sequence of [`Paper`] records to downloaded files,
//! isolating failures per paper: one paper's unreachable server or missing
//! PDF link never aborts the rest of the batch. The result is a partition of
//! the input into a success map (paper id → local path) and a failure map
//! (paper id → error), with disjoint key sets covering every input.
//!
//! Downloads run sequentially in input order. Parallelizing the loop with a
//! bounded worker pool is a possible extension, not something this module
//! does.
//!
//! # Examples
//!
//! ```no_run
//! use gleaner::{downloader::PdfDownloader, paper::Paper};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(papers: Vec<Paper>) {
//! let downloader = PdfDownloader::new("papers");
//! let outcome = downloader.download(&CancellationToken::new(), &papers).await;
//!
//! for (id, path) in &outcome.downloaded {
//!   println!("{id} -> {}", path.display());
//! }
//! for (id, err) in &outcome.failed {
//!   eprintln!("{id} failed: {err}");
//! }
//! # }
//! ```

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
  error::{GleanerError, Result},
  paper::Paper,
};

/// Result partition of a batch download.
///
/// Every input paper's identifier appears in exactly one of the two maps.
#[derive(Debug, Default)]
pub struct DownloadOutcome {
  /// Papers whose PDF was written successfully, keyed by paper id.
  pub downloaded: HashMap<String, PathBuf>,
  /// Papers that failed, keyed by paper id. Each value is a
  /// [`GleanerError::PaperDownload`] wrapping the underlying cause.
  pub failed:     HashMap<String, GleanerError>,
}

/// Downloads the PDF artifacts of a batch of papers into a local directory.
///
/// The downloader holds no per-request state beyond its construction-time
/// configuration; concurrent invocations share nothing. The download
/// directory is assumed to exist — creating it is the caller's job.
#[derive(Debug, Clone)]
pub struct PdfDownloader {
  /// Internal web client used to retrieve artifacts.
  client:       reqwest::Client,
  /// Directory destination files are written into.
  download_dir: PathBuf,
}

impl PdfDownloader {
  /// Creates a downloader writing into the given directory.
  pub fn new(download_dir: impl Into<PathBuf>) -> Self {
    Self { client: reqwest::Client::new(), download_dir: download_dir.into() }
  }

  /// Downloads each paper's PDF, partitioning the batch into successes and
  /// failures.
  ///
  /// Papers are processed sequentially in input order; a failure is recorded
  /// against that paper's id and the loop moves on, so this method never
  /// fails as a whole. A paper with no PDF-typed link fails without a
  /// network call. Cancellation aborts the in-flight transfer promptly and
  /// records the remaining papers as cancelled.
  pub async fn download(&self, cancel: &CancellationToken, papers: &[Paper]) -> DownloadOutcome {
    let mut outcome = DownloadOutcome::default();

    for paper in papers {
      let result = self.download_paper(cancel, paper).await;
      match result {
        Ok(path) => {
          debug!("Downloaded {} to {}", paper.id, path.display());
          outcome.downloaded.insert(paper.id.clone(), path);
        },
        Err(err) => {
          warn!("Failed to download {}: {err}", paper.id);
          outcome.failed.insert(paper.id.clone(), GleanerError::PaperDownload(Box::new(err)));
        },
      }
    }

    outcome
  }

  /// Downloads a single paper's PDF and returns the destination path.
  async fn download_paper(&self, cancel: &CancellationToken, paper: &Paper) -> Result<PathBuf> {
    let link = paper.pdf_link().ok_or_else(|| GleanerError::MissingPdfLink(paper.id.clone()))?;
    let path = self.download_dir.join(paper.filename());

    if cancel.is_cancelled() {
      return Err(GleanerError::Cancelled);
    }

    let response = tokio::select! {
      _ = cancel.cancelled() => return Err(GleanerError::Cancelled),
      response = self.client.get(&link.href).send() => response?,
    };

    let status = response.status();
    if !status.is_success() {
      return Err(GleanerError::ExternalApi(status));
    }

    write_body(cancel, response, &path).await?;
    Ok(path)
  }
}

/// Streams a response body into a freshly created destination file.
///
/// The file handle is dropped on every exit path; on failure the partially
/// written file is left in place.
async fn write_body(
  cancel: &CancellationToken,
  response: reqwest::Response,
  path: &Path,
) -> Result<()> {
  let mut file = tokio::fs::File::create(path).await?;
  let mut stream = response.bytes_stream();

  loop {
    let chunk = tokio::select! {
      _ = cancel.cancelled() => return Err(GleanerError::Cancelled),
      chunk = stream.next() => chunk,
    };
    match chunk {
      Some(chunk) => file.write_all(&chunk?).await?,
      None => break,
    }
  }

  file.flush().await?;
  Ok(())
}
