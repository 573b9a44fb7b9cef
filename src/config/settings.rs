use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Competitor search settings
    #[serde(default)]
    pub search: SearchSettings,

    /// Language model settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Write debug logs to a file instead of stderr
    #[serde(default)]
    pub debug: bool,

    /// Debug log file (or directory). Defaults next to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    /// How debug log files are rotated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep (0 keeps everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            llm: LlmSettings::default(),
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
        }
    }
}

/// Connection settings for the company search API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Search API base URL
    #[serde(default = "default_search_api_base")]
    pub api_base: String,

    /// Request timeout in seconds
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_base: default_search_api_base(),
            timeout_secs: default_search_timeout(),
        }
    }
}

/// Settings for the analysis model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider type
    #[serde(default)]
    pub provider: Provider,

    /// Optional custom API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_base: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl LlmSettings {
    /// Base URL to use, falling back to the provider's public endpoint
    pub fn resolved_api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }
}

/// Supported LLM providers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
}

impl Provider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    None,
    Daily,
    Session,
}

fn default_search_api_base() -> String {
    "https://api.exa.ai".to_string()
}

fn default_search_timeout() -> u64 {
    60
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_llm_timeout() -> u64 {
    120
}
