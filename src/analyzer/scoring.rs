use serde::Serialize;

use crate::analyzer::{messages, misconceptions::detect_misconceptions};
use crate::models::Locale;

/// Concept count the base score is normalised against.
///
/// This is a fixed ceiling, not the number of concepts actually extracted:
/// five matches already earn the full base score.
pub const ASSUMED_CONCEPT_CEILING: f64 = 5.0;

const STRENGTH_BONUS_PER_ITEM: f64 = 5.0;
const STRENGTH_BONUS_CAP: f64 = 20.0;
const IMPROVEMENT_PENALTY_PER_ITEM: f64 = 5.0;
const IMPROVEMENT_PENALTY_CAP: f64 = 30.0;

/// Outcome of matching a learner's words against the lesson's key concepts.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptAnalysis {
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub suggestions: Vec<String>,
    pub misconceptions: Vec<String>,
    pub concept_matches: usize,
}

/// A concept counts as understood when any of its words is a substring of a
/// learner word or the other way round. This is intentionally loose.
fn is_understood(concept: &str, user_words: &[String]) -> bool {
    concept.split_whitespace().any(|word| {
        user_words
            .iter()
            .any(|user_word| user_word.contains(word) || word.contains(user_word.as_str()))
    })
}

pub fn analyze_against_key_concepts(
    key_concepts: &[String],
    understanding: &str,
    locale: Locale,
) -> ConceptAnalysis {
    let user_words: Vec<String> = understanding
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut analysis = ConceptAnalysis::default();

    for concept in key_concepts {
        if is_understood(concept, &user_words) {
            analysis.concept_matches += 1;
            analysis
                .strengths
                .push(messages::concept_understood(locale, concept));
        } else {
            analysis
                .areas_for_improvement
                .push(messages::concept_needs_study(locale, concept));
            analysis
                .suggestions
                .push(messages::concept_suggestion(locale, concept));
        }
    }

    analysis.misconceptions = detect_misconceptions(understanding, locale);
    analysis
        .areas_for_improvement
        .extend(analysis.misconceptions.iter().cloned());

    if (analysis.concept_matches as f64) < key_concepts.len() as f64 * 0.5 {
        analysis
            .suggestions
            .push(messages::reread_suggestion(locale).to_string());
        analysis
            .suggestions
            .push(messages::mind_map_suggestion(locale).to_string());
    }

    analysis
}

/// Score in `0..=100` from the match count and the two message lists.
pub fn calculate_comprehension_score(
    concept_matches: usize,
    strengths: &[String],
    areas_for_improvement: &[String],
) -> u8 {
    let base = (concept_matches as f64 / ASSUMED_CONCEPT_CEILING * 100.0).min(100.0);
    let strength_bonus = (strengths.len() as f64 * STRENGTH_BONUS_PER_ITEM).min(STRENGTH_BONUS_CAP);
    let improvement_penalty = (areas_for_improvement.len() as f64 * IMPROVEMENT_PENALTY_PER_ITEM)
        .min(IMPROVEMENT_PENALTY_CAP);

    (base + strength_bonus - improvement_penalty)
        .clamp(0.0, 100.0)
        .round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concepts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn messages_of(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("message {i}")).collect()
    }

    #[test]
    fn matched_concept_becomes_strength() {
        let analysis = analyze_against_key_concepts(
            &concepts(&["machine learning"]),
            "Machine learning lets computers learn from data without explicit programs",
            Locale::En,
        );
        assert_eq!(analysis.concept_matches, 1);
        assert_eq!(
            analysis.strengths,
            vec![messages::concept_understood(Locale::En, "machine learning")]
        );
        assert!(analysis.areas_for_improvement.is_empty());
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn substring_match_works_in_both_directions() {
        let words = vec!["photosynthetic".to_string()];
        assert!(is_understood("synthetic", &words));
        let words = vec!["cell".to_string()];
        assert!(is_understood("cells", &words));
        let words = vec!["dog".to_string()];
        assert!(!is_understood("cat", &words));
    }

    #[test]
    fn unmatched_concepts_add_parallel_improvement_and_suggestion() {
        let analysis = analyze_against_key_concepts(
            &concepts(&["osmosis", "diffusion", "membrane"]),
            "Water moves through a membrane",
            Locale::En,
        );
        assert_eq!(analysis.concept_matches, 1);
        assert_eq!(analysis.areas_for_improvement.len(), 2);
        // Two per-concept suggestions plus the two generic ones (1 < 1.5).
        assert_eq!(analysis.suggestions.len(), 4);
        assert_eq!(
            analysis.suggestions[3],
            messages::mind_map_suggestion(Locale::En)
        );
    }

    #[test]
    fn misconceptions_are_appended_to_improvements() {
        let analysis = analyze_against_key_concepts(
            &concepts(&["gravity"]),
            "Gravity is maybe not a force",
            Locale::En,
        );
        assert_eq!(analysis.concept_matches, 1);
        assert_eq!(analysis.misconceptions.len(), 2);
        assert_eq!(analysis.areas_for_improvement, analysis.misconceptions);
    }

    #[test]
    fn empty_understanding_lists_every_concept_as_improvement() {
        let key = concepts(&["osmosis", "diffusion"]);
        let analysis = analyze_against_key_concepts(&key, "", Locale::En);
        assert_eq!(analysis.concept_matches, 0);
        assert!(analysis.strengths.is_empty());
        assert_eq!(analysis.areas_for_improvement.len(), 2);

        let score = calculate_comprehension_score(
            analysis.concept_matches,
            &analysis.strengths,
            &analysis.areas_for_improvement,
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn score_uses_fixed_ceiling_of_five() {
        assert_eq!(calculate_comprehension_score(1, &messages_of(1), &[]), 25);
        assert_eq!(calculate_comprehension_score(5, &[], &[]), 100);
        assert_eq!(calculate_comprehension_score(3, &messages_of(3), &messages_of(2)), 65);
    }

    #[test]
    fn score_is_clamped_for_large_inputs() {
        assert_eq!(calculate_comprehension_score(100, &messages_of(100), &[]), 100);
        assert_eq!(calculate_comprehension_score(0, &[], &messages_of(100)), 0);
        assert_eq!(
            calculate_comprehension_score(usize::MAX, &messages_of(100), &messages_of(100)),
            90
        );
    }
}
