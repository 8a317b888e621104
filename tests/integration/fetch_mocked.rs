//! EFetch tests against a mocked E-utilities server

mod common;

use common::{article_set, create_mock_client, create_mock_client_with, pubmed_article};
use pubmed_export::pubmed::extract;
use pubmed_export::{ClientConfig, PubMedError};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn single_article_set(pmid: &str) -> String {
    article_set(&[pubmed_article(
        pmid,
        &format!("Article {}", pmid),
        "Journal",
        "2024",
        &[("Ada", "Lovelace")],
    )])
}

#[tokio::test]
#[traced_test]
async fn test_fetch_joins_ids_in_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("id", "101,102"))
        .and(query_param("retmode", "xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_set(&[
                    pubmed_article("101", "First", "Journal A", "2023", &[("Ann", "Lee")]),
                    pubmed_article("102", "Second", "Journal B", "2024", &[]),
                ]))
                .insert_header("content-type", "text/xml"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let document = client.fetch(&ids(&["101", "102"])).await.unwrap();

    assert_eq!(document.roots().len(), 1);
    let table = extract(&document);
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0].title, "First");
    assert_eq!(table.records()[1].authors, "No authors");
}

#[tokio::test]
#[traced_test]
async fn test_fetch_splits_into_batches() {
    let mock_server = MockServer::start().await;

    for (id_param, pmid) in [("1,2", "1"), ("3,4", "3"), ("5", "5")] {
        Mock::given(method("GET"))
            .and(path("/efetch.fcgi"))
            .and(query_param("id", id_param))
            .respond_with(ResponseTemplate::new(200).set_body_string(single_article_set(pmid)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = create_mock_client_with(&mock_server, ClientConfig::new().with_batch_size(2));
    let document = client
        .fetch(&ids(&["1", "2", "3", "4", "5"]))
        .await
        .unwrap();

    assert_eq!(document.roots().len(), 3);
    let titles: Vec<String> = extract(&document)
        .iter()
        .map(|r| r.title.clone())
        .collect();
    assert_eq!(titles, vec!["Article 1", "Article 3", "Article 5"]);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_failing_batch_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(single_article_set("1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "2"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(single_article_set("3")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client_with(&mock_server, ClientConfig::new().with_batch_size(1));
    let result = client.fetch(&ids(&["1", "2", "3"])).await;

    assert!(matches!(result, Err(PubMedError::ApiError { status: 502, .. })));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<PubmedArticleSet><PubmedArticle></PubmedArticleSet>"),
        )
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.fetch(&ids(&["1"])).await;

    assert!(matches!(result, Err(PubMedError::XmlError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_degenerate_response_yields_fewer_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(single_article_set("9")))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let document = client.fetch(&ids(&["9", "10", "11"])).await.unwrap();

    assert_eq!(extract(&document).len(), 1);
}
