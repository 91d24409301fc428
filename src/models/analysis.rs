//! Result shapes returned to the UI by the analyzer.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        ConfidenceLevel::Medium
    }
}

impl FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(ConfidenceLevel::High),
            "medium" => Ok(ConfidenceLevel::Medium),
            "low" => Ok(ConfidenceLevel::Low),
            other => Err(format!("unknown confidence level '{other}'")),
        }
    }
}

/// Comprehension assessment for one understanding of one lesson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub comprehension_score: u8,
    pub factual_accuracy: u8,
    pub is_correct: bool,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_explanation: String,
    pub key_concepts: Vec<String>,
    pub misconceptions: Vec<String>,
    pub confidence_level: ConfidenceLevel,
    /// Unparsed model output, kept for debugging the external path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeValidationResult {
    pub overall_accuracy: u8,
    pub question_results: Vec<QuestionResult>,
    pub confidence: u8,
}

/// Clamp an arbitrary numeric score into `0..=100`, rounding to the nearest integer.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_bounds_and_rounds() {
        assert_eq!(clamp_score(-12.0), 0);
        assert_eq!(clamp_score(250.0), 100);
        assert_eq!(clamp_score(72.5), 73);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn confidence_level_parses_loosely() {
        assert_eq!("HIGH".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::High));
        assert_eq!(" low".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::Low));
        assert!("certain".parse::<ConfidenceLevel>().is_err());
    }

    #[test]
    fn raw_response_is_omitted_when_absent() {
        let result = AnalysisResult {
            comprehension_score: 10,
            factual_accuracy: 10,
            is_correct: false,
            feedback: String::new(),
            strengths: vec![],
            areas_for_improvement: vec![],
            suggestions: vec![],
            detailed_explanation: String::new(),
            key_concepts: vec![],
            misconceptions: vec![],
            confidence_level: ConfidenceLevel::Low,
            raw_response: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("rawResponse").is_none());
        assert_eq!(json["comprehensionScore"], 10);
        assert_eq!(json["confidenceLevel"], "low");
    }
}
