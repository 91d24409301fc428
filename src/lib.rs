pub mod analyzer;
pub mod db;
#[cfg(feature = "desktop")]
mod history;
pub mod lesson;
pub mod models;
pub mod settings;
#[cfg(feature = "desktop")]
mod settings_commands;
pub mod utils;

pub use analyzer::{AIAnalyzer, AnalyzerConfig, AnalyzerError, ProviderConfig};
pub use db::Database;
pub use lesson::LessonError;
pub use settings::SettingsStore;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::{Mutex, PoisonError};

    use anyhow::Context;
    use log::{info, warn};
    use tauri::Manager;
    use tokio::sync::RwLock;

    use crate::{
        analyzer::{
            commands::{analyze_understanding, configure_ai, get_ai_status, validate_knowledge},
            AIAnalyzer,
        },
        db::Database,
        history::commands::{
            delete_learning_session, get_learning_categories, get_learning_history,
            get_learning_session, get_learning_stats, save_learning_session,
            update_learning_session,
        },
        lesson::commands::{clear_current_lesson, get_current_lesson, load_lesson_file, upload_lesson},
        models::LessonContent,
        settings::SettingsStore,
        settings_commands::{get_settings, update_settings},
        utils::init_logging,
    };

    pub(crate) struct AppState {
        pub(crate) db: Database,
        pub(crate) analyzer: RwLock<AIAnalyzer>,
        pub(crate) settings: SettingsStore,
        current_lesson: Mutex<Option<LessonContent>>,
    }

    impl AppState {
        pub(crate) fn current_lesson(&self) -> Option<LessonContent> {
            self.current_lesson
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub(crate) fn set_current_lesson(&self, lesson: Option<LessonContent>) {
            *self
                .current_lesson
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = lesson;
        }
    }

    /// Analyzer from stored settings. A bad stored provider falls back to the
    /// local path instead of blocking startup.
    fn build_analyzer(settings: &SettingsStore) -> AIAnalyzer {
        let mut config = settings.analyzer_config();
        let provider = config.provider.take();
        let mut analyzer = AIAnalyzer::local(&config);

        if let Some(provider) = provider {
            if let Err(err) = analyzer.configure_ai(provider) {
                warn!("Ignoring stored AI provider: {err}");
            }
        }

        analyzer
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        init_logging();

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let result: anyhow::Result<()> = (|| {
                    let app_data_dir = app
                        .path()
                        .app_data_dir()
                        .context("failed to resolve app data directory")?;

                    let database = Database::new(app_data_dir.join("learnai.db"))?;
                    let settings = SettingsStore::new(app_data_dir.join("settings.json"))?;
                    let analyzer = build_analyzer(&settings);

                    info!(
                        "LearnAI ready (locale: {}, AI provider configured: {})",
                        analyzer.locale().as_str(),
                        analyzer.is_configured()
                    );

                    app.manage(AppState {
                        db: database,
                        analyzer: RwLock::new(analyzer),
                        settings,
                        current_lesson: Mutex::new(None),
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                upload_lesson,
                load_lesson_file,
                get_current_lesson,
                clear_current_lesson,
                analyze_understanding,
                validate_knowledge,
                configure_ai,
                get_ai_status,
                save_learning_session,
                get_learning_session,
                update_learning_session,
                delete_learning_session,
                get_learning_history,
                get_learning_categories,
                get_learning_stats,
                get_settings,
                update_settings,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;
