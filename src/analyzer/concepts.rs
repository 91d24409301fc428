use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Upper bound on concepts returned for one lesson.
pub const MAX_KEY_CONCEPTS: usize = 10;

/// Sentences this short (in characters, after trimming) carry no concept.
const MIN_SENTENCE_CHARS: usize = 10;

const STOPLIST: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Valid sentence break regex"));

static CONCEPT_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        // "<phrase> is / are / refers to / means / defined as"
        Regex::new(r"(?i)(\w+(?:\s+\w+){0,3})\s+(?:is|are|refers to|means|defined as)")
            .expect("Valid definition regex"),
        // "the <phrase> process / method / technique / approach / system"
        Regex::new(
            r"(?i)(?:the|a|an)\s+(\w+(?:\s+\w+){0,3})\s+(?:process|method|technique|approach|system)",
        )
        .expect("Valid process regex"),
        // "<phrase> consists of / includes / contains / involves"
        Regex::new(r"(?i)(\w+(?:\s+\w+){0,3})\s+(?:consists of|includes|contains|involves)")
            .expect("Valid containment regex"),
    ]
});

/// Sentences of `content` long enough to be worth scanning, trimmed.
pub(crate) fn sentences(content: &str) -> impl Iterator<Item = &str> {
    SENTENCE_BREAK
        .split(content)
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
}

/// Extract up to [`MAX_KEY_CONCEPTS`] candidate key terms from lesson text.
///
/// Concepts keep the order in which the pattern scan found them; there is no
/// ranking. The result is lowercase, unique and a pure function of `content`.
pub fn extract_key_concepts(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut concepts = Vec::new();

    for sentence in sentences(content) {
        for pattern in CONCEPT_PATTERNS.iter() {
            for captures in pattern.captures_iter(sentence) {
                let Some(phrase) = captures.get(1) else {
                    continue;
                };
                let concept = phrase.as_str().trim().to_lowercase();
                if seen.insert(concept.clone()) {
                    concepts.push(concept);
                }
            }
        }
    }

    concepts
        .into_iter()
        .filter(|concept| concept.chars().count() > 2 && !STOPLIST.contains(&concept.as_str()))
        .take(MAX_KEY_CONCEPTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_definition_subject() {
        let concepts = extract_key_concepts(
            "Machine learning is a subset of artificial intelligence that enables computers to learn from data.",
        );
        assert!(concepts.contains(&"machine learning".to_string()));
    }

    #[test]
    fn scans_all_three_patterns_in_order() {
        let concepts =
            extract_key_concepts("The scientific method consists of observation and experiment.");
        assert_eq!(concepts, vec!["scientific", "the scientific method"]);
    }

    #[test]
    fn empty_and_short_input_yield_nothing() {
        assert!(extract_key_concepts("").is_empty());
        assert!(extract_key_concepts("It is so.").is_empty());
    }

    #[test]
    fn output_is_bounded_unique_lowercase_and_stoplist_free() {
        let content = (0..30)
            .map(|i| format!("Topic{i} Alpha is important for everyone here"))
            .collect::<Vec<_>>()
            .join(". ");
        let concepts = extract_key_concepts(&content);

        assert_eq!(concepts.len(), MAX_KEY_CONCEPTS);
        let unique: HashSet<_> = concepts.iter().collect();
        assert_eq!(unique.len(), concepts.len());
        for concept in &concepts {
            assert_eq!(concept, &concept.to_lowercase());
            assert!(concept.chars().count() > 2);
            assert!(!STOPLIST.contains(&concept.as_str()));
        }
    }

    #[test]
    fn repeated_phrases_are_deduplicated() {
        let concepts = extract_key_concepts(
            "Photosynthesis is how plants make food. Photosynthesis is powered by light!",
        );
        assert_eq!(concepts, vec!["photosynthesis"]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let content = "A neural network is a model. The training process includes many steps. \
                       Gradient descent refers to an optimisation method.";
        assert_eq!(extract_key_concepts(content), extract_key_concepts(content));
    }
}
