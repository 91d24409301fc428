//! Tauri commands for user settings.

use serde::Deserialize;
use tauri::State;

use crate::{models::Locale, settings::UserSettings, AppState};

/// Settings the UI may change directly. The API key goes through `configure_ai`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub locale: Option<Locale>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub simulated_analysis_ms: Option<u64>,
    pub simulated_validation_ms: Option<u64>,
}

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<UserSettings, String> {
    Ok(state.settings.current().redacted())
}

/// Persist `patch`. Locale changes apply to the running analyzer at once;
/// model and latency changes take effect on the next launch.
#[tauri::command]
pub async fn update_settings(
    state: State<'_, AppState>,
    patch: SettingsPatch,
) -> Result<UserSettings, String> {
    let updated = state
        .settings
        .update(|settings| {
            if let Some(locale) = patch.locale {
                settings.locale = locale;
            }
            if let Some(model) = patch.model.filter(|m| !m.trim().is_empty()) {
                settings.ai.model = model;
            }
            if let Some(temperature) = patch.temperature {
                settings.ai.temperature = temperature.clamp(0.0, 2.0);
            }
            if let Some(max_tokens) = patch.max_tokens {
                settings.ai.max_tokens = max_tokens.max(1);
            }
            if let Some(ms) = patch.simulated_analysis_ms {
                settings.simulated_analysis_ms = ms;
            }
            if let Some(ms) = patch.simulated_validation_ms {
                settings.simulated_validation_ms = ms;
            }
        })
        .map_err(|e| e.to_string())?;

    state.analyzer.write().await.set_locale(updated.locale);

    Ok(updated.redacted())
}
