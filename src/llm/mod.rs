pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{Completion, Message, Role};

/// Chat-style language model: a conversation in, one completion out
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<Completion, LlmError>;
}

/// Language model errors
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unauthorized ({status}): invalid or missing API key")]
    Unauthorized { status: u16 },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API request failed ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
