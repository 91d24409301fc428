pub mod analysis;
pub mod lesson;
pub mod locale;

pub use analysis::{
    clamp_score, AnalysisResult, ConfidenceLevel, KnowledgeValidationResult, QuestionResult,
};
pub use lesson::{ContentSection, LessonContent};
pub use locale::Locale;
