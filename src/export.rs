//! CSV export of extracted records

use std::path::Path;

use tracing::{info, instrument};

use crate::error::{PubMedError, Result};
use crate::pubmed::ResultTable;

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "pubmed_results.csv";

/// Header row, in column order
pub const HEADER: [&str; 4] = ["Title", "Authors", "Journal", "Year"];

/// Write `table` to `path` as CSV, replacing any existing file
///
/// Fields are quoted only when they contain a comma, a quote or a line break,
/// and rows end with CRLF. The header is written even for an empty table.
/// The file handle is closed when this function returns, on error paths too.
#[instrument(skip(table), fields(path = %path.display(), rows = table.len()))]
pub fn export(table: &ResultTable, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(|e| PubMedError::io(path, e))?;

    writer
        .write_record(HEADER)
        .map_err(|e| PubMedError::io(path, e))?;
    for record in table {
        writer
            .serialize(record)
            .map_err(|e| PubMedError::io(path, e))?;
    }
    writer.flush().map_err(|e| PubMedError::io(path, e))?;

    info!("Export completed");
    Ok(())
}
