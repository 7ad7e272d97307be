//! CLI subcommands and their shared search arguments.

use std::path::PathBuf;

use clap::Args;
use gleaner::fetcher::FetchConfig;

use super::*;

pub mod download;
pub mod fetch;

pub use download::download;
pub use fetch::fetch;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Search arXiv and print matching paper metadata
  Fetch {
    /// Search parameters
    #[command(flatten)]
    search: SearchArgs,

    /// Emit the results as JSON instead of a styled listing
    #[arg(long)]
    json:   bool,
  },

  /// Search arXiv and download the PDFs of matching papers
  Download {
    /// Search parameters
    #[command(flatten)]
    search: SearchArgs,

    /// Directory to download PDFs into. Defaults to the platform download
    /// directory, falling back to ./papers
    #[arg(long, short)]
    output: Option<PathBuf>,
  },
}

/// Search parameters shared by the fetch and download commands
#[derive(Args, Clone)]
pub struct SearchArgs {
  /// Subject classification code to search within, e.g. "cs.CR"
  #[arg(long, short)]
  pub category:    String,

  /// Keyword to AND into the search query; repeatable
  #[arg(long = "keyword", short)]
  pub keywords:    Vec<String>,

  /// Restrict to papers submitted in the last N days
  #[arg(long, value_name = "N")]
  pub last_days:   Option<u32>,

  /// Cap on the number of results returned by the API
  #[arg(long, short)]
  pub max_results: Option<u32>,
}

impl SearchArgs {
  /// Builds the library fetch configuration for these arguments.
  pub fn to_config(&self) -> FetchConfig {
    FetchConfig {
      category:    self.category.clone(),
      keywords:    self.keywords.clone(),
      time_span:   self.last_days.map(|days| format!("last_{days}_days")),
      max_results: self.max_results,
    }
  }
}
