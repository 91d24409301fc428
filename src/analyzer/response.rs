//! Tolerant reading of model output.
//!
//! The model is asked for bare JSON but often wraps it in prose or markdown
//! fences. Parsing runs in two stages: the whole trimmed text first, then the
//! span from the first `{` to the last `}`. Once an object is found, every
//! field is read on its own so a missing or mistyped field only loses that
//! field.

use serde_json::{Map, Value};

use crate::analyzer::{concepts::extract_key_concepts, error::ModelError, messages};
use crate::models::{
    clamp_score, AnalysisResult, ConfidenceLevel, KnowledgeValidationResult, LessonContent,
    Locale, QuestionResult,
};

pub fn extract_json_object(response: &str) -> Result<Map<String, Value>, ModelError> {
    let trimmed = response.trim();

    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(object);
    }

    let (start, end) = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(ModelError::NoJson),
    };

    match serde_json::from_str::<Value>(&trimmed[start..=end])? {
        Value::Object(object) => Ok(object),
        _ => Err(ModelError::NoJson),
    }
}

fn number(object: &Map<String, Value>, key: &str) -> Option<f64> {
    match object.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

fn boolean(object: &Map<String, Value>, key: &str) -> Option<bool> {
    match object.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = object.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// Map a parsed analysis object onto [`AnalysisResult`], defaulting field by field.
pub fn analysis_from_object(
    object: &Map<String, Value>,
    lesson: &LessonContent,
    locale: Locale,
) -> AnalysisResult {
    let comprehension = number(object, "comprehensionScore").unwrap_or(0.0);
    // A zero accuracy counts as unanswered.
    let factual = number(object, "factualAccuracy")
        .filter(|accuracy| *accuracy != 0.0)
        .unwrap_or(comprehension);

    let mut key_concepts = string_list(object, "keyConcepts")
        .unwrap_or_else(|| extract_key_concepts(&lesson.content));
    dedup_in_order(&mut key_concepts);

    AnalysisResult {
        comprehension_score: clamp_score(comprehension),
        factual_accuracy: clamp_score(factual),
        is_correct: boolean(object, "isCorrect").unwrap_or(false),
        feedback: text(object, "feedback")
            .unwrap_or_else(|| messages::unable_to_analyze(locale).to_string()),
        strengths: string_list(object, "strengths").unwrap_or_default(),
        areas_for_improvement: string_list(object, "areasForImprovement").unwrap_or_default(),
        suggestions: string_list(object, "suggestions").unwrap_or_default(),
        detailed_explanation: text(object, "detailedExplanation").unwrap_or_default(),
        key_concepts,
        misconceptions: string_list(object, "misconceptions").unwrap_or_default(),
        confidence_level: text(object, "confidenceLevel")
            .and_then(|level| level.parse().ok())
            .unwrap_or_default(),
        raw_response: None,
    }
}

pub fn parse_analysis_response(
    response: &str,
    lesson: &LessonContent,
    locale: Locale,
) -> Result<AnalysisResult, ModelError> {
    let object = extract_json_object(response)?;
    let mut result = analysis_from_object(&object, lesson, locale);
    result.raw_response = Some(response.to_string());
    Ok(result)
}

/// Fixed low-confidence result used whenever the external path fails.
pub fn degraded_analysis(lesson: &LessonContent, locale: Locale) -> AnalysisResult {
    let text = messages::degraded(locale);
    AnalysisResult {
        comprehension_score: 50,
        factual_accuracy: 50,
        is_correct: false,
        feedback: text.feedback.to_string(),
        strengths: vec![text.strength.to_string()],
        areas_for_improvement: vec![text.improvement.to_string()],
        suggestions: vec![text.suggestion.to_string()],
        detailed_explanation: text.explanation.to_string(),
        key_concepts: extract_key_concepts(&lesson.content),
        misconceptions: Vec::new(),
        confidence_level: ConfidenceLevel::Low,
        raw_response: None,
    }
}

fn question_from_value(value: &Value) -> Option<QuestionResult> {
    let object = value.as_object()?;
    Some(QuestionResult {
        question: text(object, "question").unwrap_or_default(),
        user_answer: text(object, "userAnswer").unwrap_or_default(),
        is_correct: boolean(object, "isCorrect").unwrap_or(false),
        correct_answer: text(object, "correctAnswer").unwrap_or_default(),
        explanation: text(object, "explanation").unwrap_or_default(),
    })
}

pub fn parse_validation_response(response: &str) -> Result<KnowledgeValidationResult, ModelError> {
    let object = extract_json_object(response)?;

    let question_results = object
        .get("questionResults")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(question_from_value).collect())
        .unwrap_or_default();

    Ok(KnowledgeValidationResult {
        overall_accuracy: clamp_score(number(&object, "overallAccuracy").unwrap_or(0.0)),
        question_results,
        confidence: clamp_score(number(&object, "confidence").unwrap_or(0.0)),
    })
}

/// Result returned when the external validation call fails: every question
/// marked unanswered, zero accuracy and zero confidence.
pub fn degraded_validation(questions: &[String], locale: Locale) -> KnowledgeValidationResult {
    let explanation = messages::validation_unavailable(locale);
    KnowledgeValidationResult {
        overall_accuracy: 0,
        question_results: questions
            .iter()
            .map(|question| QuestionResult {
                question: question.clone(),
                user_answer: String::new(),
                is_correct: false,
                correct_answer: String::new(),
                explanation: explanation.to_string(),
            })
            .collect(),
        confidence: 0,
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
