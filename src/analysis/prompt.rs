use super::types::CompetitorRecord;

/// Build the single instruction message sent to the model.
///
/// Competitor records are embedded as 2-space indented JSON.
pub fn build_analysis_prompt(
    country_context: &str,
    competitors: &[CompetitorRecord],
) -> Result<String, serde_json::Error> {
    let competitors_json = serde_json::to_string_pretty(competitors)?;

    Ok(format!(
        r#"As a competitive analysis expert, analyze these competitors in the {country} market:
{competitors}

Based on their websites and market presence, provide a detailed analysis focusing on:
1. Market gaps they're not addressing
2. Their key weaknesses
3. Features that could differentiate from them
4. Pricing strategy recommendations
5. Growth opportunities in {country}

Return your analysis in this exact JSON format:
{{
    "market_gaps": [
        "Specific gap 1 with explanation",
        "Specific gap 2 with explanation",
        "Specific gap 3 with explanation"
    ],
    "competitor_weaknesses": [
        "Detailed weakness 1",
        "Detailed weakness 2",
        "Detailed weakness 3"
    ],
    "recommended_features": [
        "Specific feature 1 with justification",
        "Specific feature 2 with justification",
        "Specific feature 3 with justification"
    ],
    "pricing_strategy": "Detailed pricing recommendation based on competitor analysis",
    "growth_opportunities": [
        "Specific opportunity 1 in {country}",
        "Specific opportunity 2 in {country}",
        "Specific opportunity 3 in {country}"
    ]
}}

Ensure all recommendations are specific, actionable, and based on the competitor data provided."#,
        country = country_context,
        competitors = competitors_json,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{CountryFilter, REQUIRED_KEYS};

    #[test]
    fn prompt_embeds_country_and_records() {
        let records = vec![CompetitorRecord::placeholder(
            0,
            "https://rival.example",
            CountryFilter::India,
        )];
        let prompt = build_analysis_prompt("India", &records).unwrap();

        assert!(prompt.contains("competitors in the India market"));
        assert!(prompt.contains("Specific opportunity 3 in India"));
        assert!(prompt.contains("  {\n    \"company_name\": \"Competitor 1\""));
        assert!(prompt.contains("\"url\": \"https://rival.example\""));
        for key in REQUIRED_KEYS {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing {key}");
        }
    }

    #[test]
    fn empty_competitor_list_renders_empty_array() {
        let prompt = build_analysis_prompt("Global", &[]).unwrap();
        assert!(prompt.contains("in the Global market:\n[]\n"));
    }
}
