use std::fmt;

use async_trait::async_trait;

use super::types::{ImageDetails, SearchPage, SearchRequest};

/// Errors that can occur while talking to an image search backend.
///
/// The core treats every variant as the same opaque transport failure;
/// the distinction only shows up in the log.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Config(msg) => write!(f, "config error: {msg}"),
            SearchError::Network(msg) => write!(f, "network error: {msg}"),
            SearchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SearchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Fetches one page of results for the given query.
    async fn search(&self, request: SearchRequest<'_>) -> Result<SearchPage, SearchError>;

    /// Downloads a full-resolution image and reports what arrived.
    async fn fetch_details(&self, url: &str) -> Result<ImageDetails, SearchError>;
}
