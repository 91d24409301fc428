use tauri::State;

use crate::{
    analyzer::{check_understanding, messages, AIAnalyzer, ProviderConfig, ProviderKind},
    db::NewLearningSession,
    log_error, log_info,
    models::{AnalysisResult, KnowledgeValidationResult, LessonContent},
    AppState,
};

const ENABLE_LOGS: bool = true;

/// Clone of the analyzer so slow model calls run without holding the lock.
async fn analyzer_snapshot(state: &State<'_, AppState>) -> AIAnalyzer {
    state.analyzer.read().await.clone()
}

async fn lesson_or_err(state: &State<'_, AppState>) -> Result<LessonContent, String> {
    match state.current_lesson() {
        Some(lesson) => Ok(lesson),
        None => {
            let locale = state.analyzer.read().await.locale();
            Err(messages::no_lesson_loaded(locale).to_string())
        }
    }
}

/// Analyze the learner's understanding of the current lesson. When a
/// `user_id` is given the attempt is also saved to history; a failed save is
/// logged and does not hide the analysis.
#[tauri::command]
pub async fn analyze_understanding(
    state: State<'_, AppState>,
    understanding: String,
    user_id: Option<String>,
    category: Option<String>,
    time_spent: Option<u32>,
) -> Result<AnalysisResult, String> {
    let lesson = lesson_or_err(&state).await?;

    let analyzer = analyzer_snapshot(&state).await;
    check_understanding(&understanding, analyzer.locale())?;
    let result = analyzer.analyze_understanding(&lesson, &understanding).await;

    log_info!(
        "Analyzed understanding of {:?}: score {}",
        lesson.title,
        result.comprehension_score
    );

    if let Some(user_id) = user_id.filter(|id| !id.trim().is_empty()) {
        let record = NewLearningSession {
            user_id,
            lesson_title: lesson.title,
            lesson_content: lesson.content,
            user_understanding: understanding,
            ai_feedback: result.feedback.clone(),
            comprehension_score: result.comprehension_score,
            category,
            time_spent,
        };
        if let Err(err) = state.db.create_learning_session(record).await {
            log_error!("Failed to save learning session: {err:#}");
        }
    }

    Ok(result)
}

#[tauri::command]
pub async fn validate_knowledge(
    state: State<'_, AppState>,
    understanding: String,
    questions: Option<Vec<String>>,
) -> Result<KnowledgeValidationResult, String> {
    let lesson = lesson_or_err(&state).await?;
    let analyzer = analyzer_snapshot(&state).await;
    Ok(analyzer
        .validate_knowledge(&lesson, &understanding, questions.as_deref())
        .await)
}

/// Switch the analyzer to Gemini and remember the key for later launches.
#[tauri::command]
pub async fn configure_ai(
    state: State<'_, AppState>,
    api_key: String,
    model: Option<String>,
) -> Result<(), String> {
    let stored = state.settings.current().ai;
    let provider = ProviderConfig {
        name: ProviderKind::Gemini,
        api_key: api_key.trim().to_string(),
        model: model.filter(|m| !m.trim().is_empty()).unwrap_or(stored.model),
        temperature: stored.temperature,
        max_tokens: stored.max_tokens,
    };

    state
        .analyzer
        .write()
        .await
        .configure_ai(provider.clone())
        .map_err(|e| e.to_string())?;

    state
        .settings
        .update(|settings| {
            settings.ai.api_key = Some(provider.api_key);
            settings.ai.model = provider.model;
        })
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[tauri::command]
pub async fn get_ai_status(state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.analyzer.read().await.is_configured())
}
