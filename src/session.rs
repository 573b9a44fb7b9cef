use crate::analysis::{
    AnalysisOutcome, AnalyzerError, CompetitorAnalyzer, CompetitorRecord, CountryFilter,
};

/// Last competitor list and last analysis of this process.
///
/// Each run overwrites both slots; a failed search leaves them untouched.
#[derive(Debug, Default)]
pub struct Session {
    competitors: Option<Vec<CompetitorRecord>>,
    analysis: Option<AnalysisOutcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find competitors for `description` and analyze them.
    pub async fn run(
        &mut self,
        analyzer: &CompetitorAnalyzer,
        description: &str,
        country: CountryFilter,
    ) -> Result<&AnalysisOutcome, AnalyzerError> {
        let urls = analyzer
            .get_competitor_urls(description, country.as_search_country())
            .await?;

        tracing::info!(country = %country, urls = ?urls, "found competitors");

        let competitors = CompetitorRecord::from_urls(&urls, country);
        let outcome = analyzer.analyze_competitors(&competitors).await;

        if let Some(reason) = outcome.reason() {
            tracing::warn!(tier = ?outcome.tier(), reason = %reason, "analysis degraded to fallback");
        }

        self.competitors = Some(competitors);
        Ok(&*self.analysis.insert(outcome))
    }

    pub fn competitors(&self) -> Option<&[CompetitorRecord]> {
        self.competitors.as_deref()
    }

    pub fn analysis(&self) -> Option<&AnalysisOutcome> {
        self.analysis.as_ref()
    }
}
