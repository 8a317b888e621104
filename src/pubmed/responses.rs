use tracing::debug;

use super::document::parse_document;
use crate::error::Result;

/// The parts of an ESearch XML response the client looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ESearchResult {
    /// Text of every `<Id>` element in the document, in order
    pub ids: Vec<String>,
    /// Top-level `<Count>`: total matches, not just those returned
    pub count: Option<usize>,
    /// `<ERROR>` reported by NCBI with a 200 status
    pub error: Option<String>,
}

impl ESearchResult {
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = parse_document(xml)?;

        let mut ids = Vec::new();
        for id in root.find_all("Id") {
            match id.non_empty_text() {
                Some(text) => ids.push(text),
                None => debug!("Skipping empty <Id> element"),
            }
        }

        let count = root
            .child("Count")
            .and_then(|c| c.text().parse::<usize>().ok());
        let error = root.child("ERROR").and_then(|e| e.non_empty_text());

        Ok(Self { ids, count, error })
    }
}
