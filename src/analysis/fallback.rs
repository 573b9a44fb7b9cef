//! Fixed analyses substituted when the model's answer can't be used.
//!
//! Neither payload is derived from the competitor data.

use serde_json::{json, Map};

use super::types::AnalysisResult;

/// Generic analysis returned when the model responded with unusable JSON
pub fn parse_fallback() -> AnalysisResult {
    build(
        &[
            "Untapped market segment identified",
            "Service quality gap",
            "Technology implementation gap",
        ],
        &[
            "Limited feature set",
            "Poor user experience",
            "Lack of innovation",
        ],
        &[
            "AI-powered analytics",
            "Advanced automation capabilities",
            "Integrated workflow solutions",
        ],
        "Implement a value-based pricing model with competitive entry-level options",
        &[
            "Expand to enterprise market",
            "Develop industry-specific solutions",
            "Focus on international expansion",
        ],
    )
}

/// Error-flavored analysis returned when the analysis could not run
pub fn outer_fallback() -> AnalysisResult {
    build(
        &[
            "Error analyzing market gaps",
            "Please try again with more specific competitor information",
        ],
        &[
            "Error analyzing competitor weaknesses",
            "Please check the competitor data provided",
        ],
        &[
            "Error generating feature recommendations",
            "Please ensure competitor information is complete",
        ],
        "Error determining pricing strategy. Please try again.",
        &[
            "Error analyzing growth opportunities",
            "Please verify the market context provided",
        ],
    )
}

fn build(
    market_gaps: &[&str],
    competitor_weaknesses: &[&str],
    recommended_features: &[&str],
    pricing_strategy: &str,
    growth_opportunities: &[&str],
) -> AnalysisResult {
    let mut map = Map::new();
    map.insert("market_gaps".into(), json!(market_gaps));
    map.insert("competitor_weaknesses".into(), json!(competitor_weaknesses));
    map.insert("recommended_features".into(), json!(recommended_features));
    map.insert("pricing_strategy".into(), json!(pricing_strategy));
    map.insert("growth_opportunities".into(), json!(growth_opportunities));
    AnalysisResult::from_trusted_map(map)
}
