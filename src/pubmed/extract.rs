//! Flattening EFetch articles into sentinel-filled records

use serde::Serialize;
use tracing::{debug, instrument};

use super::document::XmlElement;
use super::models::ArticleDocument;

pub const NO_TITLE: &str = "No title";
pub const NO_AUTHORS: &str = "No authors";
pub const NO_JOURNAL: &str = "No journal";
pub const NO_YEAR: &str = "No year";

/// Per-article container tag in EFetch responses
pub const ARTICLE_TAG: &str = "PubmedArticle";

/// One exported row. Every field holds either a value or its sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Journal")]
    pub journal: String,
    #[serde(rename = "Year")]
    pub year: String,
}

impl ArticleRecord {
    /// Extract the four fields of one `PubmedArticle` element
    ///
    /// - title: first `ArticleTitle` below the article
    /// - journal: first `Title` below the article
    /// - year: first `Year` directly under a `PubDate`
    /// - authors: `"ForeName LastName"` for each `Author` with both parts,
    ///   joined by `", "`
    pub fn from_element(article: &XmlElement) -> Self {
        let title = article
            .find("ArticleTitle")
            .and_then(XmlElement::non_empty_text)
            .unwrap_or_else(|| NO_TITLE.to_string());

        let journal = article
            .find("Title")
            .and_then(XmlElement::non_empty_text)
            .unwrap_or_else(|| NO_JOURNAL.to_string());

        let year = article
            .find_child_of("PubDate", "Year")
            .and_then(XmlElement::non_empty_text)
            .unwrap_or_else(|| NO_YEAR.to_string());

        let names: Vec<String> = article.find_all("Author").filter_map(author_name).collect();
        let authors = if names.is_empty() {
            NO_AUTHORS.to_string()
        } else {
            names.join(", ")
        };

        Self {
            title,
            authors,
            journal,
            year,
        }
    }
}

/// `"ForeName LastName"`, or `None` unless both parts are present
fn author_name(author: &XmlElement) -> Option<String> {
    let last = author.child("LastName")?.non_empty_text()?;
    let fore = author.child("ForeName")?.non_empty_text()?;
    Some(format!("{} {}", fore, last))
}

/// Extracted records in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    records: Vec<ArticleRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ArticleRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArticleRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ArticleRecord;
    type IntoIter = std::slice::Iter<'a, ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ArticleRecord> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ArticleRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// One record per `PubmedArticle` found anywhere in the document
///
/// Never fails: absent fields become sentinels.
#[instrument(skip(document), fields(batches = document.roots().len()))]
pub fn extract(document: &ArticleDocument) -> ResultTable {
    let table: ResultTable = document
        .find_all(ARTICLE_TAG)
        .map(ArticleRecord::from_element)
        .collect();

    debug!(records = table.len(), "Extracted article records");
    table
}
