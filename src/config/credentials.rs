use std::fmt;

/// Environment variable holding the search API key
pub const EXA_API_KEY_VAR: &str = "EXA_API_KEY";
/// Environment variable holding the Gemini API key
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// API keys for the two hosted services.
///
/// Keys only ever come from the environment (optionally seeded from a `.env`
/// file); they are never written to the config file.
#[derive(Clone)]
pub struct Credentials {
    pub exa_api_key: String,
    pub google_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("exa_api_key", &"***")
            .field("google_api_key", &"***")
            .finish()
    }
}

/// Configuration errors surfaced to the user before any API call
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing API keys: {}. Please check your environment configuration.", .0.join(", "))]
    MissingApiKeys(Vec<&'static str>),
}

impl Credentials {
    /// Read both keys from the process environment.
    ///
    /// Loads `.env` from the working directory first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let exa = read(EXA_API_KEY_VAR);
        let google = read(GOOGLE_API_KEY_VAR);

        match (exa, google) {
            (Some(exa_api_key), Some(google_api_key)) => Ok(Self {
                exa_api_key,
                google_api_key,
            }),
            (exa, google) => {
                let mut missing = Vec::new();
                if exa.is_none() {
                    missing.push(EXA_API_KEY_VAR);
                }
                if google.is_none() {
                    missing.push(GOOGLE_API_KEY_VAR);
                }
                Err(ConfigError::MissingApiKeys(missing))
            }
        }
    }
}
