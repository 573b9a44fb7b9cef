//! Competitor search and LLM analysis

pub mod analyzer;
pub mod extract;
pub mod fallback;
pub mod prompt;
pub mod types;

pub use analyzer::{build_search_query, AnalyzerError, CompetitorAnalyzer, MAX_COMPETITORS};
pub use types::{
    AnalysisOutcome, AnalysisResult, CompetitorRecord, CountryFilter, FallbackTier,
    REQUIRED_KEYS,
};
