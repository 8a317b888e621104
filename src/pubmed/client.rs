use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::document::parse_document;
use crate::pubmed::models::{ArticleDocument, IdentifierList};
use crate::pubmed::query::SearchParameters;
use crate::pubmed::responses::ESearchResult;
use crate::rate_limit::RateLimiter;
use crate::retry::with_retry;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Client for the ESearch and EFetch endpoints
///
/// Requests are paced by a shared [`RateLimiter`] and transient failures are
/// retried according to the configured [`RetryConfig`](crate::retry::RetryConfig).
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with default configuration
    ///
    /// Uses NCBI's anonymous rate limit (3 requests/second).
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_export::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = PubMedClient::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.effective_user_agent());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            rate_limiter,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one ESearch request and return every identifier in the response
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` / `PubMedError::ApiError` - transport failure
    ///   or non-success status, after retries
    /// * `PubMedError::XmlError` - the response is not well-formed XML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_export::{PubMedClient, SearchParameters};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new()?;
    ///     let ids = client.search(&SearchParameters::pubmed_default()).await?;
    ///     println!("Found {} articles", ids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, params), fields(retmax = params.retmax()))]
    pub async fn search(&self, params: &SearchParameters) -> Result<IdentifierList> {
        let url = self.build_url("esearch.fcgi", params.to_query_pairs());

        debug!("Making ESearch API request");
        let body = self.make_request(&url).await?;
        let result = ESearchResult::from_xml(&body)?;

        if let Some(error) = &result.error {
            warn!(error = %error, "ESearch reported an error");
        }

        if let Some(count) = result.count {
            if count > params.retmax() {
                warn!(
                    total = count,
                    retmax = params.retmax(),
                    "Search matched more articles than requested, only the first {} are retrieved",
                    params.retmax()
                );
            }
        }

        info!(results_found = result.ids.len(), "Search completed");
        Ok(result.ids)
    }

    /// Fetch article XML for `ids` and parse it into one document
    ///
    /// The identifiers are split into batches of `batch_size`; each batch is
    /// one EFetch request with the identifiers comma-joined. Batches run in
    /// order and any failure aborts the fetch. An empty list makes no request.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    #[instrument(skip(self, ids), fields(ids_count = ids.len()))]
    pub async fn fetch(&self, ids: &[String]) -> Result<ArticleDocument> {
        let mut document = ArticleDocument::new();
        if ids.is_empty() {
            return Ok(document);
        }

        let batch_size = self.config.effective_batch_size();
        let batches = ids.len().div_ceil(batch_size);

        for (index, chunk) in ids.chunks(batch_size).enumerate() {
            let url = self.build_url(
                "efetch.fcgi",
                vec![
                    ("db", "pubmed".to_string()),
                    ("id", chunk.join(",")),
                    ("retmode", "xml".to_string()),
                ],
            );

            debug!(
                batch = index + 1,
                batches,
                batch_size = chunk.len(),
                "Making EFetch API request"
            );
            let body = self.make_request(&url).await?;
            document.push_root(parse_document(&body)?);
        }

        info!(requested = ids.len(), batches, "Fetch completed");
        Ok(document)
    }

    fn build_url(&self, endpoint: &str, params: Vec<(&'static str, String)>) -> String {
        let api_params = self.config.build_api_params();

        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .chain(api_params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();

        format!("{}/{}?{}", self.base_url, endpoint, query.join("&"))
    }

    /// GET `url` with pacing and retries, returning the body of a 2xx response
    async fn make_request(&self, url: &str) -> Result<String> {
        with_retry(
            || async move {
                self.rate_limiter.acquire().await;
                debug!("Making API request to: {}", url);

                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(PubMedError::from)?;
                let status = response.status();

                if !status.is_success() {
                    warn!("API request failed with status: {}", status);
                    return Err(PubMedError::ApiError {
                        status: status.as_u16(),
                        message: status
                            .canonical_reason()
                            .unwrap_or("Unknown error")
                            .to_string(),
                    });
                }

                response.text().await.map_err(PubMedError::from)
            },
            &self.config.retry_config,
            "NCBI API request",
        )
        .await
    }
}
