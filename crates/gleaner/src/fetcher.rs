//! Metadata retrieval from the arXiv API.
//!
//! This module builds a search query from a [`FetchConfig`], issues a single
//! GET request against arXiv's Atom feed API
//! (`http://export.arxiv.org/api/query`), and decodes the response into
//! [`Paper`] records.
//!
//! The query is assembled from the subject category, optional conjunctive
//! keyword clauses, and an optional `last_N_days` submission window. Results
//! are always requested sorted by submission date, descending.
//!
//! # Examples
//!
//! ```no_run
//! use gleaner::fetcher::{ArxivFetcher, FetchConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetchConfig {
//!   category: "cs.CR".to_string(),
//!   keywords: vec!["fuzzing".to_string()],
//!   time_span: Some("last_7_days".to_string()),
//!   max_results: Some(25),
//! };
//!
//! let fetcher = ArxivFetcher::new();
//! let papers = fetcher.fetch(&CancellationToken::new(), &config).await?;
//! for paper in &papers {
//!   println!("{}: {}", paper.id, paper.title);
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{
  error::{GleanerError, Result},
  paper::{Author, Link, Paper},
};

/// Default endpoint for arXiv's query API.
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Search configuration for a metadata fetch.
///
/// A configuration is valid when `category` is non-empty and at least one of
/// `time_span` / a positive `max_results` bounds the query; an unbounded
/// search is rejected before any request is made.
///
/// `time_span` accepts expressions of the form `last_N_days` (N a
/// non-negative integer). Any other expression is silently ignored and the
/// query proceeds without a date filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
  /// Subject classification code to search within, e.g. `cs.CR`. Required.
  pub category:    String,
  /// Keyword terms AND-ed into the search query, one clause per keyword, in
  /// order.
  #[serde(default)]
  pub keywords:    Vec<String>,
  /// Optional submission window expression of the form `last_N_days`.
  #[serde(default)]
  pub time_span:   Option<String>,
  /// Optional cap on the number of results returned by the API.
  #[serde(default)]
  pub max_results: Option<u32>,
}

/// Client for fetching paper metadata from arXiv.
///
/// Holds a reusable HTTP client and the API endpoint. The endpoint defaults
/// to [`ARXIV_API_URL`] and can be overridden with
/// [`ArxivFetcher::with_base_url`], which is also the seam tests use to point
/// the fetcher at a mock server.
#[derive(Debug, Clone)]
pub struct ArxivFetcher {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// Endpoint queries are issued against.
  base_url: Url,
}

impl ArxivFetcher {
  /// Creates a new fetcher against the public arXiv API.
  pub fn new() -> Self {
    Self {
      client:   reqwest::Client::new(),
      base_url: Url::parse(ARXIV_API_URL).expect("default arXiv endpoint is a valid URL"),
    }
  }

  /// Replaces the API endpoint.
  ///
  /// Query parameters already present on the endpoint are preserved and the
  /// search parameters are appended to them.
  pub fn with_base_url(mut self, base_url: Url) -> Self {
    self.base_url = base_url;
    self
  }

  /// Fetches paper metadata matching the given configuration.
  ///
  /// Issues a single GET request and decodes the Atom feed response. The
  /// request is raced against `cancel`; cancellation aborts the in-flight
  /// request promptly and yields [`GleanerError::Cancelled`].
  ///
  /// # Errors
  ///
  /// - [`GleanerError::MissingRequiredField`] / [`GleanerError::InvalidInput`]
  ///   for an invalid configuration (no request is issued)
  /// - [`GleanerError::Network`] for transport-level failures
  /// - [`GleanerError::ExternalApi`] for non-success status codes
  /// - [`GleanerError::ExternalApiParsing`] for a malformed feed body
  ///
  /// A well-formed feed with zero entries is not an error and yields an
  /// empty vector.
  pub async fn fetch(
    &self,
    cancel: &CancellationToken,
    config: &FetchConfig,
  ) -> Result<Vec<Paper>> {
    let url = self.build_query_url(config)?;

    debug!("Fetching from arXiv via: {url}");

    if cancel.is_cancelled() {
      return Err(GleanerError::Cancelled);
    }

    let response = tokio::select! {
      _ = cancel.cancelled() => return Err(GleanerError::Cancelled),
      response = self.client.get(url).send() => response?,
    };

    let status = response.status();
    if !status.is_success() {
      return Err(GleanerError::ExternalApi(status));
    }

    let body = tokio::select! {
      _ = cancel.cancelled() => return Err(GleanerError::Cancelled),
      body = response.text() => body?,
    };

    trace!("arXiv response: {body}");

    parse_feed(&body)
  }

  /// Builds the query URL for a configuration, validating it first.
  fn build_query_url(&self, config: &FetchConfig) -> Result<Url> {
    if config.category.is_empty() {
      return Err(GleanerError::MissingRequiredField("category"));
    }
    let max_results = config.max_results.unwrap_or(0);
    if config.time_span.is_none() && max_results == 0 {
      return Err(GleanerError::InvalidInput(
        "either a time span or a positive max_results must bound the query".to_string(),
      ));
    }

    let mut search_query = format!("cat:{}", config.category);
    for keyword in &config.keywords {
      search_query.push_str(&format!(" AND all:{keyword}"));
    }

    if let Some(span) = &config.time_span {
      match parse_time_span(span) {
        Some(days) => {
          let start = submission_window_start(days);
          search_query
            .push_str(&format!(" AND submittedDate:[{}0000 TO *]", start.format("%Y%m%d%H%M")));
        },
        None => debug!("ignoring unrecognized time span: {span}"),
      }
    }

    let mut url = self.base_url.clone();
    {
      let mut pairs = url.query_pairs_mut();
      pairs.append_pair("search_query", &search_query);
      pairs.append_pair("sortBy", "submittedDate");
      pairs.append_pair("sortOrder", "descending");
      if max_results > 0 {
        pairs.append_pair("max_results", &max_results.to_string());
      }
    }

    Ok(url)
  }
}

impl Default for ArxivFetcher {
  fn default() -> Self { Self::new() }
}

/// Parses a `last_N_days` expression into its day count.
///
/// Returns `None` for anything that does not match the pattern; the caller
/// treats that as "no date filter", not as an error.
fn parse_time_span(span: &str) -> Option<u32> {
  lazy_static! {
    /// Matches time span expressions like `last_7_days`.
    static ref TIME_SPAN: Regex = Regex::new(r"^last_(\d+)_days$").unwrap();
  }

  TIME_SPAN.captures(span).and_then(|cap| cap.get(1)).and_then(|m| m.as_str().parse().ok())
}

/// Start of the submission window, `days` days before now.
fn submission_window_start(days: u32) -> DateTime<Utc> {
  Utc::now() - Duration::days(i64::from(days))
}

/// Decodes an Atom feed body into papers, entry by entry, in feed order.
fn parse_feed(body: &str) -> Result<Vec<Paper>> {
  let feed: Feed = quick_xml::de::from_str(body).map_err(GleanerError::ExternalApiParsing)?;
  Ok(feed.entries.into_iter().map(Paper::from).collect())
}

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// A feed may contain zero or more entries; an empty feed is valid.
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a paper entry from arXiv's API response.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Canonical paper URL, e.g. `http://arxiv.org/abs/2301.07041v1`
  id:         String,
  /// Paper title (may contain LaTeX markup)
  title:      String,
  /// Paper abstract (may contain LaTeX markup)
  #[serde(default)]
  summary:    String,
  /// Publication date
  published:  DateTime<Utc>,
  /// Last-updated date
  updated:    DateTime<Utc>,
  /// List of paper authors
  #[serde(rename = "author", default)]
  authors:    Vec<EntryAuthor>,
  /// Links to the abstract page, PDF, and related resources
  #[serde(rename = "link", default)]
  links:      Vec<EntryLink>,
  /// Subject classification terms
  #[serde(rename = "category", default)]
  categories: Vec<EntryCategory>,
}

/// Internal representation of an author from arXiv's API response.
#[derive(Debug, Deserialize)]
struct EntryAuthor {
  /// Author's full name
  name: String,
}

/// Internal representation of a link element's attributes.
#[derive(Debug, Deserialize)]
struct EntryLink {
  /// Target URL
  #[serde(rename = "@href")]
  href:       String,
  /// Link relation
  #[serde(rename = "@rel", default)]
  rel:        String,
  /// Media type of the target
  #[serde(rename = "@type", default)]
  media_type: String,
}

/// Internal representation of a category element's attributes.
#[derive(Debug, Deserialize)]
struct EntryCategory {
  /// Classification term, e.g. `cs.CR`
  #[serde(rename = "@term")]
  term: String,
}

impl From<Entry> for Paper {
  fn from(entry: Entry) -> Self {
    Paper {
      id:         entry.id,
      title:      entry.title,
      summary:    entry.summary,
      authors:    entry
        .authors
        .into_iter()
        .map(|author| Author { name: author.name, affiliation: None, country: None })
        .collect(),
      published:  entry.published,
      updated:    entry.updated,
      links:      entry
        .links
        .into_iter()
        .map(|link| Link { href: link.href, rel: link.rel, media_type: link.media_type })
        .collect(),
      categories: entry.categories.into_iter().map(|category| category.term).collect(),
    }
  }
}
