use tauri::State;

use crate::{
    db::{
        HistoryPage, HistoryQuery, HistoryStats, LearningSession, LearningSessionUpdate,
        NewLearningSession,
    },
    AppState,
};

#[tauri::command]
pub async fn save_learning_session(
    state: State<'_, AppState>,
    session: NewLearningSession,
) -> Result<LearningSession, String> {
    state
        .db
        .create_learning_session(session)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_learning_session(
    state: State<'_, AppState>,
    session_id: String,
) -> Result<Option<LearningSession>, String> {
    state
        .db
        .get_learning_session(&session_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_learning_session(
    state: State<'_, AppState>,
    session_id: String,
    user_id: String,
    update: LearningSessionUpdate,
) -> Result<LearningSession, String> {
    state
        .db
        .update_learning_session(&session_id, &user_id, update)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Learning session not found".to_string())
}

/// Returns false when the session does not exist or belongs to someone else.
#[tauri::command]
pub async fn delete_learning_session(
    state: State<'_, AppState>,
    session_id: String,
    user_id: String,
) -> Result<bool, String> {
    state
        .db
        .delete_learning_session(&session_id, &user_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_learning_history(
    state: State<'_, AppState>,
    user_id: String,
    query: Option<HistoryQuery>,
) -> Result<HistoryPage, String> {
    state
        .db
        .learning_session_history(&user_id, query.unwrap_or_default())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_learning_categories(
    state: State<'_, AppState>,
    user_id: String,
) -> Result<Vec<String>, String> {
    state
        .db
        .learning_session_categories(&user_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_learning_stats(
    state: State<'_, AppState>,
    user_id: String,
) -> Result<HistoryStats, String> {
    state
        .db
        .learning_session_stats(&user_id)
        .await
        .map_err(|e| e.to_string())
}
