use std::path::PathBuf;

use tauri::State;

use crate::{
    lesson::{parse_file, parse_upload},
    log_info,
    models::LessonContent,
    AppState,
};

const ENABLE_LOGS: bool = true;

fn make_current(state: &State<'_, AppState>, lesson: LessonContent) -> LessonContent {
    log_info!(
        "Loaded lesson {:?} ({} words, ~{} min)",
        lesson.title,
        lesson.word_count,
        lesson.estimated_read_time
    );
    state.set_current_lesson(Some(lesson.clone()));
    lesson
}

/// Parse an uploaded file's text and make it the current lesson.
#[tauri::command]
pub async fn upload_lesson(
    state: State<'_, AppState>,
    file_name: String,
    content_type: Option<String>,
    text: String,
) -> Result<LessonContent, String> {
    let lesson = parse_upload(&file_name, content_type.as_deref().unwrap_or(""), &text)
        .map_err(|e| e.to_string())?;
    Ok(make_current(&state, lesson))
}

#[tauri::command]
pub async fn load_lesson_file(
    state: State<'_, AppState>,
    path: PathBuf,
) -> Result<LessonContent, String> {
    let lesson = parse_file(&path).map_err(|e| e.to_string())?;
    Ok(make_current(&state, lesson))
}

#[tauri::command]
pub async fn get_current_lesson(
    state: State<'_, AppState>,
) -> Result<Option<LessonContent>, String> {
    Ok(state.current_lesson())
}

#[tauri::command]
pub async fn clear_current_lesson(state: State<'_, AppState>) -> Result<(), String> {
    state.set_current_lesson(None);
    Ok(())
}
