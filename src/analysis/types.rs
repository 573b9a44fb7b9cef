use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Geographic scope of a competitor search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CountryFilter {
    UnitedStates,
    UnitedKingdom,
    Canada,
    Australia,
    India,
    Germany,
    France,
    Spain,
    Italy,
    Japan,
    /// No geographic restriction
    #[default]
    Global,
}

impl CountryFilter {
    pub const ALL: [CountryFilter; 11] = [
        CountryFilter::UnitedStates,
        CountryFilter::UnitedKingdom,
        CountryFilter::Canada,
        CountryFilter::Australia,
        CountryFilter::India,
        CountryFilter::Germany,
        CountryFilter::France,
        CountryFilter::Spain,
        CountryFilter::Italy,
        CountryFilter::Japan,
        CountryFilter::Global,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CountryFilter::UnitedStates => "United States",
            CountryFilter::UnitedKingdom => "United Kingdom",
            CountryFilter::Canada => "Canada",
            CountryFilter::Australia => "Australia",
            CountryFilter::India => "India",
            CountryFilter::Germany => "Germany",
            CountryFilter::France => "France",
            CountryFilter::Spain => "Spain",
            CountryFilter::Italy => "Italy",
            CountryFilter::Japan => "Japan",
            CountryFilter::Global => GLOBAL,
        }
    }

    /// The country to restrict the search to, `None` for `Global`
    pub fn as_search_country(&self) -> Option<&'static str> {
        match self {
            CountryFilter::Global => None,
            other => Some(other.name()),
        }
    }
}

/// Sentinel country name meaning "no geographic restriction"
pub const GLOBAL: &str = "Global";

impl fmt::Display for CountryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown country '{0}'. Expected one of: United States, United Kingdom, Canada, Australia, India, Germany, France, Spain, Italy, Japan, Global")]
pub struct UnknownCountry(pub String);

impl FromStr for CountryFilter {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCountry(s.to_string()))
    }
}

/// Competitor entry fed into the analysis prompt.
///
/// Only `url` and `country` carry real data; the remaining fields are fixed
/// placeholders giving the prompt a consistent shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub company_name: String,
    pub url: String,
    pub country: String,
    pub key_features: Vec<String>,
    pub tech_stack: Vec<String>,
    pub marketing_focus: String,
    pub customer_feedback: String,
}

impl CompetitorRecord {
    /// Placeholder record for the `index`-th (0-based) competitor URL
    pub fn placeholder(index: usize, url: impl Into<String>, country: CountryFilter) -> Self {
        Self {
            company_name: format!("Competitor {}", index + 1),
            url: url.into(),
            country: country.name().to_string(),
            key_features: strings(&["AI Models", "APIs", "Tools"]),
            tech_stack: strings(&["Python", "TensorFlow", "PyTorch"]),
            marketing_focus: "Enterprise AI Solutions".to_string(),
            customer_feedback: "Positive".to_string(),
        }
    }

    /// Placeholder records for a list of URLs, numbered in order
    pub fn from_urls(urls: &[String], country: CountryFilter) -> Vec<Self> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| Self::placeholder(i, url.as_str(), country))
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Keys every analysis must contain
pub const REQUIRED_KEYS: [&str; 5] = [
    "market_gaps",
    "competitor_weaknesses",
    "recommended_features",
    "pricing_strategy",
    "growth_opportunities",
];

/// Structured competitor analysis.
///
/// Wraps the JSON object returned by the model. Construction only checks that
/// the required keys are present; values are kept exactly as parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidAnalysis {
    #[error("analysis is not a JSON object")]
    NotAnObject,
    #[error("Missing required keys in analysis result: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
}

impl AnalysisResult {
    pub fn from_value(value: Value) -> Result<Self, InvalidAnalysis> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(InvalidAnalysis::NotAnObject),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Result<Self, InvalidAnalysis> {
        let missing: Vec<&'static str> = REQUIRED_KEYS
            .into_iter()
            .filter(|key| !map.contains_key(*key))
            .collect();
        if missing.is_empty() {
            Ok(Self(map))
        } else {
            Err(InvalidAnalysis::MissingKeys(missing))
        }
    }

    /// Wrap a map known to hold every required key
    pub(crate) fn from_trusted_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn market_gaps(&self) -> Vec<String> {
        self.list("market_gaps")
    }

    pub fn competitor_weaknesses(&self) -> Vec<String> {
        self.list("competitor_weaknesses")
    }

    pub fn recommended_features(&self) -> Vec<String> {
        self.list("recommended_features")
    }

    pub fn growth_opportunities(&self) -> Vec<String> {
        self.list("growth_opportunities")
    }

    /// Pricing recommendation; `None` when absent or null
    pub fn pricing_strategy(&self) -> Option<String> {
        match self.0.get("pricing_strategy")? {
            Value::Null => None,
            value => Some(display_value(value)),
        }
    }

    /// List entries as display strings. Non-array values render as a single
    /// entry; non-string items render as JSON.
    fn list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(display_value).collect(),
            Some(other) => vec![display_value(other)],
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Which degraded path produced an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackTier {
    /// The model answered but the answer was not a usable analysis
    Parse,
    /// The analysis could not be obtained at all
    Outer,
}

/// Result of `analyze_competitors`: always carries an analysis, tagged with
/// the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    ParseFallback { result: AnalysisResult, reason: String },
    OuterFallback { result: AnalysisResult, reason: String },
}

impl AnalysisOutcome {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            AnalysisOutcome::Success(result)
            | AnalysisOutcome::ParseFallback { result, .. }
            | AnalysisOutcome::OuterFallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Success(result)
            | AnalysisOutcome::ParseFallback { result, .. }
            | AnalysisOutcome::OuterFallback { result, .. } => result,
        }
    }

    /// `None` for a real analysis
    pub fn tier(&self) -> Option<FallbackTier> {
        match self {
            AnalysisOutcome::Success(_) => None,
            AnalysisOutcome::ParseFallback { .. } => Some(FallbackTier::Parse),
            AnalysisOutcome::OuterFallback { .. } => Some(FallbackTier::Outer),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Success(_) => None,
            AnalysisOutcome::ParseFallback { reason, .. }
            | AnalysisOutcome::OuterFallback { reason, .. } => Some(reason),
        }
    }
}
