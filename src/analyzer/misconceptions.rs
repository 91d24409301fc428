use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::messages;
use crate::models::Locale;

static NEGATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:ไม่|ไม่ใช่|ผิด|ไม่ถูกต้อง)|(?i:\b(?:not|wrong|incorrect|isn't|aren't)\b)")
        .expect("Valid negation regex")
});

static HEDGING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:อาจจะ|น่าจะ|คงจะ|ไม่แน่ใจ)|(?i:\b(?:maybe|probably|might|not sure|i think)\b)")
        .expect("Valid hedging regex")
});

/// Flag negation and hedging language in a learner's answer.
///
/// Each marker family adds at most one advisory, however often it occurs.
pub fn detect_misconceptions(text: &str, locale: Locale) -> Vec<String> {
    let mut misconceptions = Vec::new();

    if NEGATION.is_match(text) {
        misconceptions.push(messages::negation_advisory(locale).to_string());
    }
    if HEDGING.is_match(text) {
        misconceptions.push(messages::hedging_advisory(locale).to_string());
    }

    misconceptions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confident_text_has_no_findings() {
        assert!(detect_misconceptions("Plants turn light into sugar", Locale::En).is_empty());
        assert!(detect_misconceptions("", Locale::En).is_empty());
    }

    #[test]
    fn each_family_contributes_once() {
        let found = detect_misconceptions(
            "It is not water, not air, maybe light, probably sugar",
            Locale::En,
        );
        assert_eq!(
            found,
            vec![
                messages::negation_advisory(Locale::En).to_string(),
                messages::hedging_advisory(Locale::En).to_string(),
            ]
        );
    }

    #[test]
    fn thai_markers_are_detected() {
        let found = detect_misconceptions("น่าจะเป็นแสงแดด", Locale::Th);
        assert_eq!(found, vec![messages::hedging_advisory(Locale::Th).to_string()]);

        let found = detect_misconceptions("ไม่แน่ใจว่าถูก", Locale::Th);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn markers_inside_longer_words_are_ignored() {
        assert!(detect_misconceptions("Nothing mighty or notable here", Locale::En).is_empty());
    }
}
