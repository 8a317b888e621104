//! # pubmed-export
//!
//! Searches PubMed for studies on large language models in psychotherapy and
//! exports title, authors, journal and year of every match to a CSV file.
//!
//! The work is a five-stage pipeline run by [`pipeline::run`]:
//!
//! 1. [`SearchParameters::pubmed_default`] holds the fixed query,
//! 2. [`PubMedClient::search`] collects PMIDs from ESearch,
//! 3. [`PubMedClient::fetch`] retrieves EFetch XML in batches,
//! 4. [`extract`](pubmed::extract()) flattens each `PubmedArticle` into an
//!    [`ArticleRecord`], substituting sentinels for missing fields,
//! 5. [`export::export`] writes the CSV.
//!
//! ```no_run
//! use std::path::Path;
//! use pubmed_export::{PubMedClient, RunOutcome, SearchParameters, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new()?;
//!     let params = SearchParameters::pubmed_default();
//!
//!     match pipeline::run(&client, &params, Path::new("pubmed_results.csv")).await? {
//!         RunOutcome::NoResults => println!("No articles found."),
//!         RunOutcome::Exported { path, rows } => println!("{} rows in {}", rows, path.display()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod pubmed;
pub mod rate_limit;
pub mod retry;

pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use pipeline::RunOutcome;
pub use pubmed::{
    ArticleDocument, ArticleRecord, IdentifierList, PubMedClient, ResultTable, SearchParameters,
    SearchQuery,
};
pub use retry::RetryConfig;
