use std::sync::Arc;

use crate::config::{Config, Credentials};
use crate::llm::{ChatModel, GeminiClient, LlmError, Message};
use crate::search::providers::ExaSearchProvider;
use crate::search::{SearchError, SearchProvider, SearchRequest};

use super::extract::extract_json_payload;
use super::fallback::{outer_fallback, parse_fallback};
use super::prompt::build_analysis_prompt;
use super::types::{AnalysisOutcome, AnalysisResult, CompetitorRecord, GLOBAL};

/// Most competitor URLs kept from a search
pub const MAX_COMPETITORS: usize = 3;

/// Errors that escape the analyzer. Analysis failures never do; they become
/// fallback outcomes.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Company description must not be empty")]
    EmptyDescription,

    #[error("Failed to fetch competitor URLs: {0}")]
    Search(#[from] SearchError),

    #[error("Failed to initialize {service} client: {message}")]
    ClientInit {
        service: &'static str,
        message: String,
    },
}

/// Failures on the way to a model completion
#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("failed to serialize competitor data: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Finds competitors for a company and asks the model to analyze them.
pub struct CompetitorAnalyzer {
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn ChatModel>,
}

impl CompetitorAnalyzer {
    /// Build an analyzer backed by Exa search and Gemini
    pub fn new(credentials: &Credentials, config: &Config) -> Result<Self, AnalyzerError> {
        let search = ExaSearchProvider::new(credentials.exa_api_key.as_str(), &config.search)
            .map_err(|e| AnalyzerError::ClientInit {
                service: "search",
                message: e.to_string(),
            })?;
        let llm = GeminiClient::new(credentials.google_api_key.as_str(), config.llm.clone())
            .map_err(|e| AnalyzerError::ClientInit {
                service: "language model",
                message: e.to_string(),
            })?;

        tracing::info!(
            search_api = %config.search.api_base,
            model = %config.llm.model,
            "competitor analyzer initialized"
        );

        Ok(Self {
            search: Arc::new(search),
            llm: Arc::new(llm),
        })
    }

    /// Build an analyzer over arbitrary clients
    pub fn with_clients(search: Arc<dyn SearchProvider>, llm: Arc<dyn ChatModel>) -> Self {
        Self { search, llm }
    }

    /// Search for competitor websites matching `description`.
    ///
    /// Returns at most [`MAX_COMPETITORS`] URLs in the order the search API
    /// ranked them. A response without a results field yields no URLs.
    pub async fn get_competitor_urls(
        &self,
        description: &str,
        country: Option<&str>,
    ) -> Result<Vec<String>, AnalyzerError> {
        if description.trim().is_empty() {
            return Err(AnalyzerError::EmptyDescription);
        }

        let request =
            SearchRequest::companies(build_search_query(description, country), MAX_COMPETITORS);

        let response = self.search.search(&request).await.map_err(|e| {
            tracing::error!(error = %e, query = %request.query, "competitor search failed");
            AnalyzerError::Search(e)
        })?;

        let mut urls = response.urls();
        urls.truncate(MAX_COMPETITORS);

        tracing::info!(count = urls.len(), "competitor urls found");
        Ok(urls)
    }

    /// Analyze competitors with the language model.
    ///
    /// Never fails: unusable model output yields
    /// [`AnalysisOutcome::ParseFallback`], any other failure yields
    /// [`AnalysisOutcome::OuterFallback`].
    pub async fn analyze_competitors(&self, competitors: &[CompetitorRecord]) -> AnalysisOutcome {
        let country_context = competitors
            .first()
            .map_or(GLOBAL, |c| c.country.as_str());

        match self.request_analysis(country_context, competitors).await {
            Ok(text) => interpret_completion(&text),
            Err(e) => {
                tracing::error!(error = %e, "competitor analysis failed");
                AnalysisOutcome::OuterFallback {
                    result: outer_fallback(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn request_analysis(
        &self,
        country_context: &str,
        competitors: &[CompetitorRecord],
    ) -> Result<String, RequestError> {
        let prompt = build_analysis_prompt(country_context, competitors)?;

        tracing::debug!(
            country = %country_context,
            competitor_count = competitors.len(),
            prompt_len = prompt.len(),
            "requesting competitor analysis"
        );

        let completion = self.llm.invoke(&[Message::human(prompt)]).await?;
        Ok(completion.text())
    }
}

/// Query sent to the search API: the description, narrowed to a country
/// unless the country is absent or `Global`.
pub fn build_search_query(description: &str, country: Option<&str>) -> String {
    match country {
        Some(country) if country != GLOBAL => format!("{description} companies in {country}"),
        _ => description.to_string(),
    }
}

/// Turn completion text into an outcome, falling back on unusable JSON.
pub fn interpret_completion(text: &str) -> AnalysisOutcome {
    let payload = extract_json_payload(text);

    let parsed = serde_json::from_str::<serde_json::Value>(payload)
        .map_err(|e| e.to_string())
        .and_then(|value| AnalysisResult::from_value(value).map_err(|e| e.to_string()));

    match parsed {
        Ok(result) => AnalysisOutcome::Success(result),
        Err(reason) => {
            tracing::warn!(error = %reason, "error parsing analysis response, using generic analysis");
            AnalysisOutcome::ParseFallback {
                result: parse_fallback(),
                reason,
            }
        }
    }
}
