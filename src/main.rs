use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pubmed_export::export::DEFAULT_OUTPUT;
use pubmed_export::{
    ClientConfig, PubMedClient, RetryConfig, RunOutcome, SearchParameters, pipeline,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "pubmed-export",
    version,
    about = "Export PubMed articles on LLMs in psychotherapy to CSV",
    long_about = "Searches PubMed titles and abstracts for large language model and \
                  psychotherapy terms, then writes title, authors, journal and year \
                  of every match to a CSV file"
)]
struct Cli {
    /// Output CSV file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "pubmed-export")]
    tool: String,

    /// Retry transient failures (timeouts, 429, 5xx) up to N times
    #[arg(long, value_name = "N", default_value_t = 0)]
    retries: usize,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_tool(&self.tool);

        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        if let Some(email) = &self.email {
            config = config.with_email(email);
        }
        if self.retries > 0 {
            config = config.with_retry_config(RetryConfig::new().with_max_retries(self.retries));
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();

    let client =
        PubMedClient::with_config(cli.client_config()).context("Failed to create HTTP client")?;
    let params = SearchParameters::pubmed_default();

    let outcome = pipeline::run(&client, &params, &cli.output)
        .await
        .context("PubMed export failed")?;

    match outcome {
        RunOutcome::NoResults => println!("No articles found."),
        RunOutcome::Exported { path, .. } => println!("Results saved to {}", path.display()),
    }

    Ok(())
}
