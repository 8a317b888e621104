//! PubMed E-utilities access: the fixed query, the ESearch/EFetch client and
//! record extraction from EFetch XML.

pub mod client;
pub mod document;
pub mod extract;
pub mod models;
pub mod query;
pub(crate) mod responses;

pub use client::PubMedClient;
pub use document::{XmlElement, XmlNode, parse_document};
pub use extract::{ArticleRecord, ResultTable, extract};
pub use models::{ArticleDocument, IdentifierList};
pub use query::{SearchParameters, SearchQuery};
