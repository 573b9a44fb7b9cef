use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }
}

/// One model completion.
///
/// `content` is the extracted text when the provider response had any;
/// `raw` keeps the full response body.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: Option<String>,
    pub raw: serde_json::Value,
}

impl Completion {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: serde_json::Value::String(text.clone()),
            content: Some(text),
        }
    }

    /// The completion text, or the raw response rendered as a string when the
    /// provider returned no text content.
    pub fn text(&self) -> String {
        match &self.content {
            Some(content) => content.clone(),
            None => self.raw.to_string(),
        }
    }
}
