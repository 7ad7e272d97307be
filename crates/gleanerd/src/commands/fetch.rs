//! The `fetch` command: search arXiv and print matching paper metadata.

use gleaner::fetcher::ArxivFetcher;

use super::*;

/// Runs a metadata search and prints the results.
///
/// With `json` set, the papers are serialized to pretty-printed JSON on
/// stdout; otherwise a styled listing with title, identifier, authors, and
/// publication date is shown.
pub async fn fetch(cancel: &CancellationToken, search: &SearchArgs, json: bool) -> Result<()> {
  let config = search.to_config();
  let papers = ArxivFetcher::new().fetch(cancel, &config).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&papers)?);
    return Ok(());
  }

  if papers.is_empty() {
    println!("{} No papers found", style(WARNING_PREFIX).yellow());
    return Ok(());
  }

  println!("{} Found {} paper(s):", style(SUCCESS_PREFIX).green(), papers.len());
  for paper in &papers {
    println!("{} {}", style(TREE_BRANCH).dim(), style(&paper.title).cyan());
    println!("{}   {}", style(TREE_VERT).dim(), style(&paper.id).yellow());
    let authors =
      paper.authors.iter().map(|author| author.name.as_str()).collect::<Vec<_>>().join(", ");
    println!(
      "{}   {} ({})",
      style(TREE_VERT).dim(),
      authors,
      paper.published.format("%Y-%m-%d")
    );
  }

  Ok(())
}
