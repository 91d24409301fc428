//! Offline stand-in for knowledge validation.
//!
//! Correctness is drawn at random per question. It exists so the UI can be
//! exercised without credentials and says nothing about the learner.

use rand::Rng;

use crate::models::{KnowledgeValidationResult, QuestionResult};

/// Questions used by the stub when the caller supplies none.
pub const DEFAULT_STUB_QUESTIONS: [&str; 3] = [
    "What are the main concepts?",
    "What are the key terms?",
    "What are the main processes?",
];

const STUB_CORRECT_PROBABILITY: f64 = 0.7;

pub fn simulate_validation<R: Rng>(
    questions: &[String],
    rng: &mut R,
) -> KnowledgeValidationResult {
    let question_results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionResult {
            question: question.clone(),
            user_answer: format!("Answer {} from student understanding", index + 1),
            is_correct: rng.gen_bool(STUB_CORRECT_PROBABILITY),
            correct_answer: format!("Correct answer for question {}", index + 1),
            explanation: format!("Explanation for question {}", index + 1),
        })
        .collect();

    let correct = question_results.iter().filter(|r| r.is_correct).count();
    let overall_accuracy = if question_results.is_empty() {
        0
    } else {
        (correct as f64 / question_results.len() as f64 * 100.0).round() as u8
    };

    KnowledgeValidationResult {
        overall_accuracy,
        question_results,
        confidence: rng.gen_range(60..=100),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn questions(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Question {i}")).collect()
    }

    #[test]
    fn accuracy_matches_correct_share() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let result = simulate_validation(&questions(4), &mut rng);
            let correct = result.question_results.iter().filter(|r| r.is_correct).count();
            assert_eq!(result.overall_accuracy as usize, correct * 25);
            assert!((60..=100).contains(&result.confidence));
        }
    }

    #[test]
    fn keeps_question_order_and_text() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = simulate_validation(&questions(3), &mut rng);
        let asked: Vec<_> = result.question_results.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(asked, vec!["Question 0", "Question 1", "Question 2"]);
    }

    #[test]
    fn no_questions_means_zero_accuracy() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = simulate_validation(&[], &mut rng);
        assert_eq!(result.overall_accuracy, 0);
        assert!(result.question_results.is_empty());
    }
}
