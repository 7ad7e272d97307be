//! The `download` command: search arXiv and download the PDFs of matching
//! papers.

use gleaner::{downloader::PdfDownloader, fetcher::ArxivFetcher};

use super::*;

/// Fetches papers matching the search arguments and downloads their PDFs.
///
/// Existing destination files are only overwritten after confirmation
/// (skipped with `--accept-defaults`). Per-paper failures are reported
/// individually; the command only fails as a whole when the configuration is
/// invalid, the metadata fetch fails, or every single download fails.
pub async fn download(
  cli: &Cli,
  cancel: &CancellationToken,
  search: &SearchArgs,
  output: Option<PathBuf>,
) -> Result<()> {
  let config = search.to_config();
  let papers = ArxivFetcher::new().fetch(cancel, &config).await?;

  if papers.is_empty() {
    println!("{} No papers found, nothing to download", style(WARNING_PREFIX).yellow());
    return Ok(());
  }

  let dir = output.unwrap_or_else(default_download_dir);
  if !dir.exists() {
    println!(
      "{} Creating download directory: {}",
      style(INFO_PREFIX).blue(),
      style(dir.display()).yellow()
    );
    std::fs::create_dir_all(&dir)?;
  }

  let existing =
    papers.iter().map(|paper| dir.join(paper.filename())).filter(|path| path.exists()).count();
  if existing > 0 && !cli.accept_defaults {
    let prompt = format!("{existing} file(s) already exist in the download directory. Overwrite?");
    let proceed = dialoguer::Confirm::new().with_prompt(prompt).default(false).interact()?;
    if !proceed {
      println!("{} Skipping download", style(WARNING_PREFIX).yellow());
      return Ok(());
    }
  }

  println!(
    "{} Downloading {} paper(s) to {}",
    style(INFO_PREFIX).blue(),
    papers.len(),
    style(dir.display()).yellow()
  );

  let outcome = PdfDownloader::new(&dir).download(cancel, &papers).await;

  for (id, path) in &outcome.downloaded {
    println!(
      "{} {} {}",
      style(TREE_BRANCH).dim(),
      style(SUCCESS_PREFIX).green(),
      style(path.display()).yellow()
    );
    println!("{}   {}", style(TREE_VERT).dim(), id);
  }
  for (id, err) in &outcome.failed {
    println!("{} {} {}", style(TREE_BRANCH).dim(), style(ERROR_PREFIX).red(), id);
    println!("{}   {}", style(TREE_VERT).dim(), style(failure_reason(err)).red());
  }
  println!(
    "{} {} downloaded, {} failed",
    style(TREE_LEAF).dim(),
    outcome.downloaded.len(),
    outcome.failed.len()
  );

  if outcome.downloaded.is_empty() {
    return Err(GleanerdError::AllDownloadsFailed(outcome.failed.len()));
  }
  Ok(())
}

/// Platform download directory, falling back to a local `papers` directory.
fn default_download_dir() -> PathBuf {
  dirs::download_dir().map_or_else(|| PathBuf::from("papers"), |dir| dir.join("papers"))
}

/// Renders a per-paper failure with its root cause.
fn failure_reason(err: &gleaner::error::GleanerError) -> String {
  let mut reason = err.to_string();
  let mut source = std::error::Error::source(err);
  while let Some(cause) = source {
    reason = format!("{reason}: {cause}");
    source = cause.source();
  }
  reason
}
