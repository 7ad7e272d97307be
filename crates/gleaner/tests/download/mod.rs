//! Downloader integration tests against mock artifact servers.

use std::time::Duration;

use gleaner::{downloader::PdfDownloader, error::ErrorCode};
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;
use tracing_test::traced_test;
use wiremock::{
  matchers::{method, path},
  Mock, MockServer, ResponseTemplate,
};

use super::*;

const PDF_BYTES: &[u8] = b"%PDF-1.4 not a real paper, but stable bytes";

/// Serves `PDF_BYTES` at the given path on a fresh mock server.
async fn serve_pdf(path_str: &str) -> MockServer {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path(path_str))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec()))
    .mount(&server)
    .await;
  server
}

#[traced_test]
#[tokio::test]
async fn partial_failure_partitions_the_batch() -> TestResult<()> {
  let server = serve_pdf("/pdf/2301.07041v1").await;
  let dir = tempdir()?;

  let good_id = "http://arxiv.org/abs/2301.07041v1";
  let bad_id = "http://arxiv.org/abs/2301.99999v1";
  let papers = vec![
    paper_with_links(good_id, vec![
      html_link("https://arxiv.org/abs/2301.07041v1"),
      pdf_link(&format!("{}/pdf/2301.07041v1", server.uri())),
    ]),
    paper_with_links(bad_id, vec![html_link("https://arxiv.org/abs/2301.99999v1")]),
  ];

  let outcome =
    PdfDownloader::new(dir.path()).download(&CancellationToken::new(), &papers).await;

  // Exactly one success and one failure, disjoint, covering every input.
  assert_eq!(outcome.downloaded.len(), 1);
  assert_eq!(outcome.failed.len(), 1);
  assert!(outcome.downloaded.contains_key(good_id));
  assert!(outcome.failed.contains_key(bad_id));
  assert!(!outcome.failed.contains_key(good_id));

  let written = std::fs::read(&outcome.downloaded[good_id])?;
  assert_eq!(written, PDF_BYTES);

  let err = &outcome.failed[bad_id];
  assert!(err.matches_code(ErrorCode::PaperDownload));
  assert!(err.matches_code(ErrorCode::MissingPdfLink));
  Ok(())
}

#[tokio::test]
async fn destination_filename_comes_from_the_id() -> TestResult<()> {
  let server = serve_pdf("/pdf/2301.07041v1").await;
  let dir = tempdir()?;

  let papers = vec![paper_with_links("http://arxiv.org/abs/2301.07041v1", vec![pdf_link(
    &format!("{}/pdf/2301.07041v1", server.uri()),
  )])];

  let outcome =
    PdfDownloader::new(dir.path()).download(&CancellationToken::new(), &papers).await;

  let path = &outcome.downloaded["http://arxiv.org/abs/2301.07041v1"];
  assert_eq!(path, &dir.path().join("2301.07041v1.pdf"));
  assert!(path.exists());
  Ok(())
}

#[tokio::test]
async fn downloading_twice_produces_identical_files() -> TestResult<()> {
  let server = serve_pdf("/pdf/2301.07041v1").await;
  let dir = tempdir()?;

  let papers = vec![paper_with_links("http://arxiv.org/abs/2301.07041v1", vec![pdf_link(
    &format!("{}/pdf/2301.07041v1", server.uri()),
  )])];

  let downloader = PdfDownloader::new(dir.path());
  let cancel = CancellationToken::new();

  let first = downloader.download(&cancel, &papers).await;
  let first_bytes = std::fs::read(&first.downloaded["http://arxiv.org/abs/2301.07041v1"])?;

  let second = downloader.download(&cancel, &papers).await;
  let second_bytes = std::fs::read(&second.downloaded["http://arxiv.org/abs/2301.07041v1"])?;

  assert_eq!(first_bytes, second_bytes);
  Ok(())
}

#[tokio::test]
async fn missing_artifact_is_an_isolated_failure() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(404))
    .mount(&server)
    .await;
  let dir = tempdir()?;

  let id = "http://arxiv.org/abs/2301.07041v1";
  let papers =
    vec![paper_with_links(id, vec![pdf_link(&format!("{}/pdf/gone", server.uri()))])];

  let outcome =
    PdfDownloader::new(dir.path()).download(&CancellationToken::new(), &papers).await;

  assert!(outcome.downloaded.is_empty());
  let err = &outcome.failed[id];
  assert!(err.matches_code(ErrorCode::PaperDownload));
  assert!(err.matches_code(ErrorCode::ExternalApi));
  // No file appears for a failed paper.
  assert!(!dir.path().join("2301.07041v1.pdf").exists());
  Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() -> TestResult<()> {
  let dir = tempdir()?;
  let id = "http://arxiv.org/abs/2301.07041v1";
  // Nothing listens on this port.
  let papers = vec![paper_with_links(id, vec![pdf_link("http://127.0.0.1:1/pdf/2301.07041v1")])];

  let outcome =
    PdfDownloader::new(dir.path()).download(&CancellationToken::new(), &papers).await;

  let err = &outcome.failed[id];
  assert!(err.matches_code(ErrorCode::PaperDownload));
  assert!(err.matches_code(ErrorCode::Network));
  Ok(())
}

#[tokio::test]
async fn unwritable_destination_is_a_filesystem_failure() -> TestResult<()> {
  let server = serve_pdf("/pdf/2301.07041v1").await;
  let dir = tempdir()?;
  let missing = dir.path().join("does-not-exist");

  let id = "http://arxiv.org/abs/2301.07041v1";
  let papers =
    vec![paper_with_links(id, vec![pdf_link(&format!("{}/pdf/2301.07041v1", server.uri()))])];

  let outcome = PdfDownloader::new(&missing).download(&CancellationToken::new(), &papers).await;

  let err = &outcome.failed[id];
  assert!(err.matches_code(ErrorCode::PaperDownload));
  assert!(err.matches_code(ErrorCode::Filesystem));
  Ok(())
}

#[tokio::test]
async fn cancellation_aborts_an_inflight_download() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_bytes(PDF_BYTES.to_vec())
        .set_delay(Duration::from_secs(30)),
    )
    .mount(&server)
    .await;
  let dir = tempdir()?;

  let id = "http://arxiv.org/abs/2301.07041v1";
  let papers =
    vec![paper_with_links(id, vec![pdf_link(&format!("{}/pdf/2301.07041v1", server.uri()))])];

  let cancel = CancellationToken::new();
  {
    let cancel = cancel.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(100)).await;
      cancel.cancel();
    });
  }

  let downloader = PdfDownloader::new(dir.path());
  let outcome =
    tokio::time::timeout(Duration::from_secs(5), downloader.download(&cancel, &papers))
      .await
      .expect("cancelled download must not run to the response delay");

  let err = &outcome.failed[id];
  assert!(err.matches_code(ErrorCode::PaperDownload));
  assert!(err.matches_code(ErrorCode::Cancelled));
  Ok(())
}
