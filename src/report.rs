//! Markdown and JSON rendering of analysis results

use serde::Serialize;

use crate::analysis::{AnalysisOutcome, AnalysisResult, CompetitorRecord, FallbackTier};

/// Render an analysis as markdown sections
pub fn render_analysis_markdown(result: &AnalysisResult) -> String {
    let mut out = String::new();

    push_list(&mut out, "🎯 Market Gaps", &result.market_gaps());
    out.push('\n');
    push_list(&mut out, "⚠️ Competitor Weaknesses", &result.competitor_weaknesses());
    out.push('\n');
    push_list(&mut out, "💡 Recommended Features", &result.recommended_features());
    out.push('\n');

    let pricing = result
        .pricing_strategy()
        .unwrap_or_else(|| "No strategy available".to_string());
    push_list(&mut out, "💰 Pricing Strategy", &[pricing]);
    out.push('\n');
    push_list(&mut out, "📈 Growth Opportunities", &result.growth_opportunities());

    out
}

/// Render the competitor list as markdown links
pub fn render_competitors_markdown(competitors: &[CompetitorRecord]) -> String {
    competitors
        .iter()
        .map(|c| format!("* [{}]({}) - {}\n", c.company_name, c.url, c.country))
        .collect()
}

/// Full report: competitors (when any) followed by the analysis
pub fn render_report_markdown(competitors: &[CompetitorRecord], result: &AnalysisResult) -> String {
    let mut out = String::from("## Competitive Analysis Results\n\n");
    if !competitors.is_empty() {
        out.push_str("### Identified Competitors\n");
        out.push_str(&render_competitors_markdown(competitors));
        out.push('\n');
    }
    out.push_str(&render_analysis_markdown(result));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    competitors: &'a [CompetitorRecord],
    analysis: &'a AnalysisResult,
    /// Set when a fallback analysis replaced the model's answer
    fallback: Option<FallbackTier>,
}

/// Pretty JSON of the competitors, the analysis and the fallback tier if any
pub fn render_report_json(
    competitors: &[CompetitorRecord],
    outcome: &AnalysisOutcome,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        competitors,
        analysis: outcome.result(),
        fallback: outcome.tier(),
    })
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    out.push_str("### ");
    out.push_str(heading);
    out.push('\n');
    for item in items {
        out.push_str("* ");
        out.push_str(item);
        out.push('\n');
    }
}
