//! Shared fakes and fixtures for analyzer tests
#![allow(dead_code)]

use insights::llm::{ChatModel, Completion, LlmError, Message};
use insights::search::{SearchError, SearchHit, SearchProvider, SearchRequest, SearchResponse};
use serde_json::json;
use std::sync::Mutex;

/// Search provider returning a canned response and recording requests
pub struct FakeSearch {
    outcome: Mutex<Option<Result<SearchResponse, SearchError>>>,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSearch {
    pub fn with_urls(urls: &[&str]) -> Self {
        let results = urls
            .iter()
            .map(|url| SearchHit {
                url: url.to_string(),
                title: None,
                score: None,
            })
            .collect();
        Self::with_response(SearchResponse {
            results: Some(results),
        })
    }

    pub fn with_response(response: SearchResponse) -> Self {
        Self {
            outcome: Mutex::new(Some(Ok(response))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: SearchError) -> Self {
        Self {
            outcome: Mutex::new(Some(Err(error))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> SearchRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no search request recorded")
    }
}

#[async_trait::async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("FakeSearch called more than once")
    }
}

/// Chat model returning a canned completion and recording conversations
pub struct FakeModel {
    outcome: Mutex<Option<Result<Completion, LlmError>>>,
    pub conversations: Mutex<Vec<Vec<Message>>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self::with_completion(Completion::from_text(text))
    }

    pub fn with_completion(completion: Completion) -> Self {
        Self {
            outcome: Mutex::new(Some(Ok(completion))),
            conversations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            outcome: Mutex::new(Some(Err(error))),
            conversations: Mutex::new(Vec::new()),
        }
    }

    pub fn only_prompt(&self) -> String {
        let conversations = self.conversations.lock().unwrap();
        assert_eq!(conversations.len(), 1, "expected exactly one model call");
        assert_eq!(conversations[0].len(), 1, "expected a single-turn conversation");
        conversations[0][0].content.clone()
    }
}

#[async_trait::async_trait]
impl ChatModel for FakeModel {
    async fn invoke(&self, messages: &[Message]) -> Result<Completion, LlmError> {
        self.conversations.lock().unwrap().push(messages.to_vec());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("FakeModel called more than once")
    }
}

/// A complete analysis as a model would return it
pub fn sample_analysis() -> serde_json::Value {
    json!({
        "market_gaps": [
            "No self-serve onboarding for small teams",
            "Weak coverage of non-English markets",
            "No offline mode"
        ],
        "competitor_weaknesses": [
            "Slow support response times",
            "Opaque enterprise pricing",
            "Dated UI"
        ],
        "recommended_features": [
            "One-click data import",
            "Localized dashboards",
            "Usage-based alerts"
        ],
        "pricing_strategy": "Transparent tiered pricing with a free starter plan",
        "growth_opportunities": [
            "Partnerships with Mittelstand consultancies in Germany",
            "Public sector tenders in Germany",
            "University spin-off programs in Germany"
        ]
    })
}
