use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
    time::Duration,
};

use crate::analyzer::config::{
    AnalyzerConfig, ProviderConfig, ProviderKind, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use crate::models::Locale;

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub locale: Locale,
    pub ai: AiSettings,
    pub simulated_analysis_ms: u64,
    pub simulated_validation_ms: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        let analyzer = AnalyzerConfig::default();
        Self {
            locale: Locale::default(),
            ai: AiSettings::default(),
            simulated_analysis_ms: analyzer.simulated_analysis_latency.as_millis() as u64,
            simulated_validation_ms: analyzer.simulated_validation_latency.as_millis() as u64,
        }
    }
}

impl UserSettings {
    /// Copy safe to hand to the UI.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.ai.api_key = None;
        copy
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
    env_api_key: Option<String>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::with_env_key(path, std::env::var(API_KEY_ENV).ok())
    }

    pub fn with_env_key(path: PathBuf, env_api_key: Option<String>) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
            env_api_key: env_api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn current(&self) -> UserSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn locale(&self) -> Locale {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .locale
    }

    /// Apply `change` and write the result to disk.
    pub fn update<F>(&self, change: F) -> Result<UserSettings>
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut guard);
        self.persist(&guard)?;
        Ok(guard.clone())
    }

    /// The key the analyzer should use: the environment first, then the file.
    pub fn effective_api_key(&self) -> Option<String> {
        self.env_api_key.clone().or_else(|| {
            self.current()
                .ai
                .api_key
                .filter(|key| !key.trim().is_empty())
        })
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        let settings = self.current();
        let provider = self.effective_api_key().map(|api_key| ProviderConfig {
            name: ProviderKind::Gemini,
            api_key,
            model: settings.ai.model.clone(),
            temperature: settings.ai.temperature,
            max_tokens: settings.ai.max_tokens,
        });

        AnalyzerConfig {
            locale: settings.locale,
            provider,
            simulated_analysis_latency: Duration::from_millis(settings.simulated_analysis_ms),
            simulated_validation_latency: Duration::from_millis(settings.simulated_validation_ms),
        }
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
