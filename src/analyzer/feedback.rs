use crate::analyzer::{concepts::extract_key_concepts, messages, scoring::ConceptAnalysis};
use crate::models::{LessonContent, Locale};

/// Lower bounds of the feedback bands, highest first. Anything below the
/// last bound falls into the final band.
const BAND_THRESHOLDS: [u8; 4] = [90, 80, 70, 50];

fn band_for(score: u8) -> usize {
    BAND_THRESHOLDS
        .iter()
        .position(|threshold| score >= *threshold)
        .unwrap_or(BAND_THRESHOLDS.len())
}

pub fn generate_feedback(score: u8, locale: Locale) -> &'static str {
    messages::score_band(locale, band_for(score))
}

pub fn generate_detailed_explanation(
    lesson: &LessonContent,
    understanding: &str,
    analysis: &ConceptAnalysis,
    locale: Locale,
) -> String {
    let total_concepts = extract_key_concepts(&lesson.content).len();
    messages::detailed_explanation(
        locale,
        analysis.concept_matches,
        total_concepts,
        &lesson.summary,
        understanding,
        analysis.areas_for_improvement.len(),
    )
}
