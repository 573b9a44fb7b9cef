use crate::config::settings::SearchSettings;
use crate::logging::redact_secrets;
use crate::search::{SearchError, SearchProvider, SearchRequest, SearchResponse};
use serde::Serialize;
use std::time::Duration;

/// Exa search API provider
///
/// Documentation: https://docs.exa.ai/reference/search
pub struct ExaSearchProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl ExaSearchProvider {
    /// Create a provider against the configured endpoint
    pub fn new(api_key: impl Into<String>, settings: &SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        })
    }
}

/// Wire format of `POST /search`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchBody<'a> {
    query: &'a str,
    num_results: usize,
    #[serde(rename = "type")]
    search_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

impl<'a> From<&'a SearchRequest> for ExaSearchBody<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            query: &request.query,
            num_results: request.num_results,
            search_type: &request.search_type,
            category: request.category.as_deref(),
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for ExaSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::InvalidApiKey);
        }

        let url = format!("{}/search", self.api_base);

        tracing::debug!(
            query = %request.query,
            num_results = request.num_results,
            search_type = %request.search_type,
            category = ?request.category,
            "performing exa search"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Accept", "application/json")
            .json(&ExaSearchBody::from(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = redact_secrets(&response.text().await.unwrap_or_default());

            tracing::warn!(status = %status, error = %error_text, "exa search api error");

            return match status.as_u16() {
                401 | 403 => Err(SearchError::InvalidApiKey),
                429 => Err(SearchError::RateLimitExceeded),
                _ => Err(SearchError::ApiError(format!("HTTP {status}: {error_text}"))),
            };
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        tracing::debug!(
            query = %request.query,
            result_count = parsed.results.as_ref().map_or(0, Vec::len),
            "exa search completed"
        );

        Ok(parsed)
    }
}
