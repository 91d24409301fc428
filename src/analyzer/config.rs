use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analyzer::error::AnalyzerError;
use crate::models::Locale;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Settings for one analyzer instance, handed in at construction time.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Language of every canned message.
    pub locale: Locale,

    /// External provider; `None` keeps the analyzer on the local heuristic path.
    pub provider: Option<ProviderConfig>,

    /// Artificial latency of the local analysis path.
    pub simulated_analysis_latency: Duration,

    /// Artificial latency of the local knowledge-validation stub.
    pub simulated_validation_latency: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            provider: None,
            simulated_analysis_latency: Duration::from_millis(2000),
            simulated_validation_latency: Duration::from_millis(1500),
        }
    }
}

impl AnalyzerConfig {
    /// Same settings without any artificial latency.
    pub fn immediate(locale: Locale) -> Self {
        Self {
            locale,
            simulated_analysis_latency: Duration::ZERO,
            simulated_validation_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
}

/// Credentials and sampling settings for the external generative model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub name: ProviderKind,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ProviderConfig {
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            name: ProviderKind::Gemini,
            api_key: api_key.into(),
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.api_key.trim().is_empty() {
            return Err(AnalyzerError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_gemini_is_accepted() {
        assert!(serde_json::from_str::<ProviderConfig>(r#"{"name":"openai","apiKey":"k"}"#).is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"name":"gemini","apiKey":"k"}"#).unwrap();
        assert_eq!(config, ProviderConfig::gemini("k"));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(matches!(
            ProviderConfig::gemini("  ").validate(),
            Err(AnalyzerError::MissingApiKey)
        ));
        assert!(ProviderConfig::gemini("key").validate().is_ok());
    }
}
