//! Command line interface for the gleaner paper retrieval library.
//!
//! This crate provides a CLI tool for searching arXiv and downloading paper
//! PDFs using the `gleaner` library. It supports:
//! - Metadata search by category, keywords, and submission window
//! - Batch PDF downloads with per-paper failure reporting
//!
//! # Usage
//!
//! ```bash
//! # List recent papers in a category
//! gleaner fetch --category cs.CR --last-days 7
//!
//! # Narrow by keywords and emit JSON
//! gleaner fetch --category cs.SE --keyword fuzzing --max-results 20 --json
//!
//! # Download the PDFs of matching papers
//! gleaner download --category cs.CR --last-days 3 --output papers/
//! ```
//!
//! The CLI provides colored output and supports various verbosity levels for
//! debugging through the `-v` flag. An in-flight fetch or download aborts
//! promptly on ctrl-c.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::trace;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";
/// Branch character for tree structure
static TREE_BRANCH: &str = "├";
/// Vertical line for tree structure
static TREE_VERT: &str = "│";
/// Leaf character for tree structure (end of branch)
static TREE_LEAF: &str = "└";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Fetch arXiv paper metadata and download PDFs")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Entry point for the gleaner CLI application
///
/// Handles command line argument parsing, sets up logging, wires ctrl-c to a
/// cancellation token, and executes the requested command.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  setup_logging(cli.verbose);
  trace!("Parsed CLI arguments");

  let cancel = CancellationToken::new();
  {
    let cancel = cancel.clone();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        eprintln!("{} Interrupted, aborting...", style(WARNING_PREFIX).yellow());
        cancel.cancel();
      }
    });
  }

  match &cli.command {
    Commands::Fetch { search, json } => fetch(&cancel, search, *json).await,
    Commands::Download { search, output } => {
      download(&cli, &cancel, search, output.clone()).await
    },
  }
}
