pub mod providers;

use serde::{Deserialize, Serialize};

/// Search provider abstraction - the analyzer talks to search APIs through this
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a search request
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}

/// A single search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Number of results to ask the API for
    pub num_results: usize,
    /// Search mode, e.g. "neural"
    pub search_type: String,
    /// Optional category filter, e.g. "company"
    pub category: Option<String>,
}

impl SearchRequest {
    /// Neural company search for `query`
    pub fn companies(query: impl Into<String>, num_results: usize) -> Self {
        Self {
            query: query.into(),
            num_results,
            search_type: "neural".to_string(),
            category: Some("company".to_string()),
        }
    }
}

/// Search response as returned by the API.
///
/// `results` is `None` when the API response carried no results field at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,
}

impl SearchResponse {
    /// URLs in the order the API returned them
    pub fn urls(&self) -> Vec<String> {
        self.results
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|hit| hit.url.clone())
            .collect()
    }
}

/// Individual search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid API key")]
    InvalidApiKey,
}
