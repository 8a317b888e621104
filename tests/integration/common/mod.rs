//! Shared fixtures for mocked E-utilities tests
#![allow(dead_code)]

use std::time::Duration;

use pubmed_export::{ClientConfig, PubMedClient, RetryConfig};
use wiremock::MockServer;

/// Client pointing at `mock_server`, with fast pacing and no retries
pub fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    create_mock_client_with(mock_server, ClientConfig::new())
}

/// Like [`create_mock_client`], starting from `config`
pub fn create_mock_client_with(mock_server: &MockServer, config: ClientConfig) -> PubMedClient {
    let config = config
        .with_base_url(mock_server.uri())
        .with_rate_limit(100.0)
        .with_retry_config(RetryConfig::disabled());

    PubMedClient::with_config(config).expect("client should build")
}

/// Retry policy with millisecond delays for retry tests
pub fn fast_retries(max_retries: usize) -> RetryConfig {
    RetryConfig::new()
        .with_max_retries(max_retries)
        .with_initial_delay(Duration::from_millis(4))
        .with_max_delay(Duration::from_millis(20))
}

/// ESearch XML response listing `ids`, with `count` total matches
pub fn esearch_xml(ids: &[&str], count: usize) -> String {
    let id_list: String = ids.iter().map(|id| format!("<Id>{}</Id>", id)).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE eSearchResult PUBLIC "-//NLM//DTD esearch 20060628//EN" "https://eutils.ncbi.nlm.nih.gov/eutils/dtd/20060628/esearch.dtd">
<eSearchResult><Count>{}</Count><RetMax>{}</RetMax><RetStart>0</RetStart><IdList>{}</IdList><TranslationSet/><QueryTranslation>"llm"[Title/Abstract]</QueryTranslation></eSearchResult>"#,
        count,
        ids.len(),
        id_list
    )
}

/// One `PubmedArticle` element shaped like real EFetch output
pub fn pubmed_article(
    pmid: &str,
    title: &str,
    journal: &str,
    year: &str,
    authors: &[(&str, &str)],
) -> String {
    let author_list: String = authors
        .iter()
        .map(|(fore, last)| {
            format!(
                "<Author ValidYN=\"Y\"><LastName>{}</LastName><ForeName>{}</ForeName></Author>",
                last, fore
            )
        })
        .collect();

    format!(
        r#"<PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
        <PMID Version="1">{pmid}</PMID>
        <Article PubModel="Print-Electronic">
            <Journal>
                <ISSN IssnType="Electronic">2368-7959</ISSN>
                <JournalIssue CitedMedium="Internet">
                    <Volume>11</Volume>
                    <PubDate><Year>{year}</Year><Month>Jan</Month></PubDate>
                </JournalIssue>
                <Title>{journal}</Title>
                <ISOAbbreviation>Abbrev</ISOAbbreviation>
            </Journal>
            <ArticleTitle>{title}</ArticleTitle>
            <AuthorList CompleteYN="Y">{author_list}</AuthorList>
        </Article>
    </MedlineCitation>
    <PubmedData>
        <ArticleIdList><ArticleId IdType="pubmed">{pmid}</ArticleId></ArticleIdList>
    </PubmedData>
</PubmedArticle>"#
    )
}

/// Wrap article elements in a `PubmedArticleSet`
pub fn article_set(articles: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" ?>\n<!DOCTYPE PubmedArticleSet PUBLIC \"-//NLM//DTD PubMedArticle, 1st January 2024//EN\" \"https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd\">\n<PubmedArticleSet>\n{}\n</PubmedArticleSet>",
        articles.join("\n")
    )
}
