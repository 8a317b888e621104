//! The fixed search expression and ESearch parameters

/// Field tag restricting a term to titles and abstracts
const TITLE_ABSTRACT: &str = "[Title/Abstract]";

/// Terms naming large language models
pub const MODEL_TERMS: &[&str] = &["LLM", "Large Language Model", "ChatGPT"];

/// Terms naming psychotherapy modalities
pub const THERAPY_TERMS: &[&str] = &[
    "Psychotherapy",
    "Psychological Counseling",
    "Psychotherapeutic Intervention",
    "Cognitive Behavioral Therapy",
    "Motivational Interviewing",
    "Dialectical Behavioral Therapy",
    "Psychodynamic Therapy",
    "Interpersonal Therapy",
    "Exposure Therapy",
];

/// Safety ceiling on identifiers returned by the search, not an expected size
pub const MAX_RESULTS: usize = 5000;

/// Boolean PubMed query: any model term AND any therapy term, each matched
/// in title or abstract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    expression: String,
}

impl SearchQuery {
    /// The compiled-in query used by every run
    pub fn llm_psychotherapy() -> Self {
        let expression = format!(
            "({} AND {})",
            any_in_title_abstract(MODEL_TERMS),
            any_in_title_abstract(THERAPY_TERMS)
        );
        Self { expression }
    }

    pub fn as_str(&self) -> &str {
        &self.expression
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}

/// `("a"[Title/Abstract] OR "b"[Title/Abstract] ...)`
fn any_in_title_abstract(terms: &[&str]) -> String {
    let clauses: Vec<String> = terms
        .iter()
        .map(|term| format!("\"{}\"{}", term, TITLE_ABSTRACT))
        .collect();
    format!("({})", clauses.join(" OR "))
}

/// Parameters of the single ESearch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    db: &'static str,
    term: SearchQuery,
    retmax: usize,
    retmode: &'static str,
}

impl SearchParameters {
    /// `{db: pubmed, term: <query>, retmax: 5000, retmode: xml}`
    pub fn pubmed_default() -> Self {
        Self {
            db: "pubmed",
            term: SearchQuery::llm_psychotherapy(),
            retmax: MAX_RESULTS,
            retmode: "xml",
        }
    }

    pub fn db(&self) -> &str {
        self.db
    }

    pub fn term(&self) -> &SearchQuery {
        &self.term
    }

    pub fn retmax(&self) -> usize {
        self.retmax
    }

    pub fn retmode(&self) -> &str {
        self.retmode
    }

    /// Query-string pairs in request order, values not yet URL-encoded
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("db", self.db.to_string()),
            ("term", self.term.as_str().to_string()),
            ("retmax", self.retmax.to_string()),
            ("retmode", self.retmode.to_string()),
        ]
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self::pubmed_default()
    }
}
