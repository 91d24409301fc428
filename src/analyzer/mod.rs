//! Comprehension analysis of a learner's free-text understanding.
//!
//! [`AIAnalyzer`] either forwards to an external generative model or, when no
//! provider has been configured, runs the local heuristic pipeline:
//! concept extraction, concept matching, scoring and canned feedback.
//! Neither path ever fails; the external path degrades to a fixed
//! low-confidence result and logs why.

pub mod client;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod concepts;
pub mod config;
pub mod error;
pub mod feedback;
pub mod messages;
pub mod misconceptions;
pub mod prompts;
pub mod response;
pub mod scoring;
pub mod validation;

use std::{sync::Arc, time::Duration};

use crate::models::{
    AnalysisResult, ConfidenceLevel, KnowledgeValidationResult, LessonContent, Locale,
};
use crate::{log_info, log_warn};

pub use client::{GeminiClient, GenerativeModel};
pub use concepts::extract_key_concepts;
pub use config::{AnalyzerConfig, ProviderConfig, ProviderKind};
pub use error::{AnalyzerError, ModelError};
pub use feedback::{generate_detailed_explanation, generate_feedback};
pub use misconceptions::detect_misconceptions;
pub use scoring::{analyze_against_key_concepts, calculate_comprehension_score, ConceptAnalysis};

const ENABLE_LOGS: bool = true;

/// Score at or above which the local path marks an answer correct.
const CORRECT_THRESHOLD: u8 = 70;

/// Shortest understanding, in characters after trimming, worth analyzing.
pub const MIN_UNDERSTANDING_CHARS: usize = 10;

/// Reject an understanding too short to analyze, with a message in `locale`.
pub fn check_understanding(understanding: &str, locale: Locale) -> Result<(), String> {
    if understanding.trim().chars().count() < MIN_UNDERSTANDING_CHARS {
        return Err(messages::understanding_too_short(locale, MIN_UNDERSTANDING_CHARS));
    }
    Ok(())
}

#[derive(Clone)]
enum Provider {
    Unconfigured,
    External(Arc<dyn GenerativeModel>),
}

/// Clones share the model client. Callers holding the analyzer behind a lock
/// clone it out and run the slow call without the guard.
#[derive(Clone)]
pub struct AIAnalyzer {
    locale: Locale,
    provider: Provider,
    simulated_analysis_latency: Duration,
    simulated_validation_latency: Duration,
}

impl AIAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let mut analyzer = Self::local(&config);
        if let Some(provider) = config.provider {
            analyzer.configure_ai(provider)?;
        }
        Ok(analyzer)
    }

    /// Analyzer on the local heuristic path, ignoring any provider in `config`.
    pub fn local(config: &AnalyzerConfig) -> Self {
        Self {
            locale: config.locale,
            provider: Provider::Unconfigured,
            simulated_analysis_latency: config.simulated_analysis_latency,
            simulated_validation_latency: config.simulated_validation_latency,
        }
    }

    /// Analyzer already bound to `model`, ignoring any provider in `config`.
    pub fn with_model(config: &AnalyzerConfig, model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            provider: Provider::External(model),
            ..Self::local(config)
        }
    }

    /// Switch to the external provider. There is no way back to the local path.
    pub fn configure_ai(&mut self, provider: ProviderConfig) -> Result<(), AnalyzerError> {
        provider.validate()?;
        log_info!("Configured {:?} provider with model {}", provider.name, provider.model);
        self.provider = Provider::External(Arc::new(GeminiClient::new(provider)));
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.provider, Provider::External(_))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub async fn analyze_understanding(
        &self,
        lesson: &LessonContent,
        understanding: &str,
    ) -> AnalysisResult {
        match &self.provider {
            Provider::External(model) => {
                self.analyze_with_model(model.as_ref(), lesson, understanding)
                    .await
            }
            Provider::Unconfigured => {
                if !self.simulated_analysis_latency.is_zero() {
                    tokio::time::sleep(self.simulated_analysis_latency).await;
                }
                self.analyze_locally(lesson, understanding)
            }
        }
    }

    async fn analyze_with_model(
        &self,
        model: &dyn GenerativeModel,
        lesson: &LessonContent,
        understanding: &str,
    ) -> AnalysisResult {
        let prompt = prompts::build_analysis_prompt(lesson, understanding, self.locale);

        let outcome = match model.generate(&prompt).await {
            Ok(raw) => response::parse_analysis_response(&raw, lesson, self.locale),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(result) => result,
            Err(err) => {
                log_warn!("AI analysis failed, returning degraded result: {err}");
                response::degraded_analysis(lesson, self.locale)
            }
        }
    }

    /// The offline heuristic pipeline, without any artificial latency.
    pub fn analyze_locally(&self, lesson: &LessonContent, understanding: &str) -> AnalysisResult {
        let key_concepts = extract_key_concepts(&lesson.content);
        let analysis = analyze_against_key_concepts(&key_concepts, understanding, self.locale);
        let score = calculate_comprehension_score(
            analysis.concept_matches,
            &analysis.strengths,
            &analysis.areas_for_improvement,
        );
        let detailed_explanation =
            generate_detailed_explanation(lesson, understanding, &analysis, self.locale);

        AnalysisResult {
            comprehension_score: score,
            factual_accuracy: score,
            is_correct: score >= CORRECT_THRESHOLD,
            feedback: generate_feedback(score, self.locale).to_string(),
            strengths: analysis.strengths,
            areas_for_improvement: analysis.areas_for_improvement,
            suggestions: analysis.suggestions,
            detailed_explanation,
            key_concepts,
            misconceptions: analysis.misconceptions,
            confidence_level: ConfidenceLevel::Medium,
            raw_response: None,
        }
    }

    pub async fn validate_knowledge(
        &self,
        lesson: &LessonContent,
        understanding: &str,
        questions: Option<&[String]>,
    ) -> KnowledgeValidationResult {
        match &self.provider {
            Provider::External(model) => {
                let questions = questions.map(<[String]>::to_vec).unwrap_or_else(|| {
                    prompts::DEFAULT_VALIDATION_QUESTIONS
                        .iter()
                        .map(|q| q.to_string())
                        .collect()
                });
                let prompt =
                    prompts::build_validation_prompt(lesson, understanding, &questions, self.locale);

                let outcome = match model.generate(&prompt).await {
                    Ok(raw) => response::parse_validation_response(&raw),
                    Err(err) => Err(err),
                };

                outcome.unwrap_or_else(|err| {
                    log_warn!("Knowledge validation failed, returning degraded result: {err}");
                    response::degraded_validation(&questions, self.locale)
                })
            }
            Provider::Unconfigured => {
                let questions = questions.map(<[String]>::to_vec).unwrap_or_else(|| {
                    validation::DEFAULT_STUB_QUESTIONS
                        .iter()
                        .map(|q| q.to_string())
                        .collect()
                });
                if !self.simulated_validation_latency.is_zero() {
                    tokio::time::sleep(self.simulated_validation_latency).await;
                }
                validation::simulate_validation(&questions, &mut rand::thread_rng())
            }
        }
    }
}
