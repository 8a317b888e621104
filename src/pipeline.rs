//! Search → fetch → extract → export, in that order

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::Result;
use crate::export::export;
use crate::pubmed::{PubMedClient, SearchParameters, extract};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The search matched nothing; nothing was fetched or written
    NoResults,
    /// `rows` records were written to `path`
    Exported { path: PathBuf, rows: usize },
}

/// Run the whole pipeline once
///
/// The output file is only created after every fetch batch has been
/// retrieved and parsed, so any transport or parse error leaves an existing
/// file untouched.
#[instrument(skip(client, params), fields(output = %output.display()))]
pub async fn run(
    client: &PubMedClient,
    params: &SearchParameters,
    output: &Path,
) -> Result<RunOutcome> {
    let ids = client.search(params).await?;
    if ids.is_empty() {
        info!("Search returned no identifiers");
        return Ok(RunOutcome::NoResults);
    }

    let document = client.fetch(&ids).await?;
    let table = extract(&document);
    info!(
        identifiers = ids.len(),
        records = table.len(),
        "Extracted article records"
    );

    export(&table, output)?;

    Ok(RunOutcome::Exported {
        path: output.to_path_buf(),
        rows: table.len(),
    })
}
