use std::path::Path;
use std::result;

use crate::retry::RetryableError;
use thiserror::Error;

/// Error types for the search, fetch and export stages
///
/// Transport failures are `RequestError` and `ApiError`, malformed responses
/// are `XmlError`, and output failures are `IoError`. None of them is
/// recovered by the pipeline.
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Output file could not be created or written
    #[error("IO error on {path}: {message}")]
    IoError { path: String, message: String },
}

pub type Result<T> = result::Result<T, PubMedError>;

impl PubMedError {
    pub(crate) fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        PubMedError::IoError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for PubMedError {
    fn from(err: quick_xml::Error) -> Self {
        PubMedError::XmlError(err.to_string())
    }
}

impl RetryableError for PubMedError {
    fn is_retryable(&self) -> bool {
        match self {
            PubMedError::RequestError(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }

                if let Some(status) = err.status() {
                    return status.is_server_error() || status.as_u16() == 429;
                }

                // DNS and other network errors
                !err.is_builder() && !err.is_redirect() && !err.is_decode()
            }

            PubMedError::ApiError { status, .. } => {
                (500..600).contains(status) || *status == 429
            }

            PubMedError::XmlError(_) | PubMedError::IoError { .. } => false,
        }
    }

    fn retry_reason(&self) -> &str {
        match self {
            PubMedError::RequestError(err) if err.is_timeout() => "Request timeout",
            PubMedError::RequestError(err) if err.is_connect() => "Connection error",
            PubMedError::RequestError(_) => "Network error",
            PubMedError::ApiError { status: 429, .. } => "Rate limit exceeded",
            PubMedError::ApiError { status: 500..=599, .. } => "Server error",
            PubMedError::ApiError { .. } => "Client error",
            PubMedError::XmlError(_) => "Invalid XML response",
            PubMedError::IoError { .. } => "File system error",
        }
    }
}
