use crate::config::settings::LlmSettings;
use crate::llm::types::{Completion, Message, Role};
use crate::llm::{ChatModel, LlmError};
use crate::logging::redact_secrets;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Google Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    settings: LlmSettings,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.resolved_api_base().trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait::async_trait]
impl ChatModel for GeminiClient {
    async fn invoke(&self, messages: &[Message]) -> Result<Completion, LlmError> {
        let url = self.endpoint();

        tracing::debug!(
            model = %self.settings.model,
            temperature = self.settings.temperature,
            message_count = messages.len(),
            "gemini generateContent request"
        );

        let body = GenerateContentRequest::new(messages, &self.settings);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map(|body| redact_secrets(&body))
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!(status = %status, error = %error_text, "gemini api returned error");

            return Err(match status.as_u16() {
                401 | 403 => LlmError::Unauthorized {
                    status: status.as_u16(),
                },
                429 => LlmError::RateLimitExceeded,
                code => LlmError::ApiError {
                    status: code,
                    message: error_text,
                },
            });
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let content = extract_candidate_text(&raw);
        tracing::debug!(
            has_content = content.is_some(),
            content_len = content.as_ref().map_or(0, String::len),
            "gemini response received"
        );

        Ok(Completion { content, raw })
    }
}

/// Concatenate the text parts of the first candidate, if any.
fn extract_candidate_text(raw: &serde_json::Value) -> Option<String> {
    let parts = raw["candidates"][0]["content"]["parts"].as_array()?;
    let texts: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(messages: &'a [Message], settings: &LlmSettings) -> Self {
        Self {
            contents: messages
                .iter()
                .map(|m| Content {
                    role: match m.role {
                        Role::Human => "user",
                    },
                    parts: vec![Part { text: &m.content }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: settings.temperature,
                max_output_tokens: settings.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}
