//! Environment-driven configuration for the completion service and logging.

use std::env;

use crate::error::{ConfigError, ConfigResult};

/// Default model used for both resolution and retrieval.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Public Gemini REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Tracing filter applied when `CHORD_FINDER_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "chord_finder=info";

/// Completion service configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Endpoint root, without the `/v1beta/...` path
    pub base_url: String,

    /// Model identifier, e.g. gemini-2.5-flash
    pub model: String,

    /// API key sent with every request
    pub api_key: String,

    /// Optional request timeout in seconds. `None` leaves the HTTP client
    /// without a timeout.
    pub timeout_secs: Option<u64>,
}

impl GeminiConfig {
    /// Load configuration from environment variables. `API_KEY` wins over
    /// `GEMINI_API_KEY` when both are present.
    pub fn from_env() -> ConfigResult<Self> {
        let api_key = get_required_env("API_KEY")
            .or_else(|_| get_required_env("GEMINI_API_KEY"))
            .map_err(|_| ConfigError::MissingEnvVar("API_KEY".to_string()))?;

        Ok(Self {
            base_url: get_env_or_default("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            model: get_env_or_default("GEMINI_MODEL", DEFAULT_MODEL),
            api_key,
            timeout_secs: parse_optional_env("GEMINI_TIMEOUT_SECS")?,
        })
    }

    /// Create a configuration pointing at a custom URL (useful for testing)
    pub fn with_url(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: url.into(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout_secs: None,
        }
    }

    /// Full URL of the `generateContent` endpoint for the configured model
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    /// Tracing filter directive
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            gemini: GeminiConfig::from_env()?,
            log_filter: get_env_or_default("CHORD_FINDER_LOG", DEFAULT_LOG_FILTER),
        })
    }
}

/// Helper function to get a required environment variable
pub fn get_required_env(name: &str) -> ConfigResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an optional environment variable
pub fn parse_optional_env<T>(name: &str) -> ConfigResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url() {
        let config = GeminiConfig::with_url("http://localhost:8080", "key");
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_generate_url_with_trailing_slash() {
        let mut config = GeminiConfig::with_url("http://localhost:8080/", "key");
        config.model = "gemini-2.0-flash".to_string();
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_with_url_has_no_timeout() {
        let config = GeminiConfig::with_url("http://localhost:8080", "key");
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.api_key, "key");
    }

    #[test]
    fn test_missing_env_var() {
        let err = get_required_env("CHORD_FINDER_TEST_SURELY_UNSET").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "CHORD_FINDER_TEST_SURELY_UNSET"));
    }

    #[test]
    fn test_parse_optional_env_unset() {
        let value: Option<u64> = parse_optional_env("CHORD_FINDER_TEST_TIMEOUT_UNSET").unwrap();
        assert_eq!(value, None);
    }
}
