use crate::models::{LessonContent, Locale};

/// Questions asked when the caller supplies none.
pub const DEFAULT_VALIDATION_QUESTIONS: [&str; 4] = [
    "What are the main concepts covered in this lesson?",
    "What are the key definitions or terms?",
    "What are the main processes or methods described?",
    "What are the important relationships between concepts?",
];

fn language_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "English",
        Locale::Th => "Thai",
    }
}

pub fn build_analysis_prompt(lesson: &LessonContent, understanding: &str, locale: Locale) -> String {
    let language = language_name(locale);
    format!(
        r#"You are an expert educational AI that analyzes student understanding. Please analyze the following student's understanding of the lesson content.

LESSON TITLE: {title}
LESSON CONTENT: {content}
LESSON SUMMARY: {summary}

STUDENT'S UNDERSTANDING: {understanding}

Please provide a comprehensive analysis in the following JSON format (respond ONLY with valid JSON, do not include any explanation, markdown, or text outside the JSON):
{{
  "comprehensionScore": number (0-100),
  "factualAccuracy": number (0-100),
  "isCorrect": boolean,
  "feedback": "string (in {language})",
  "strengths": ["string array (in {language})"],
  "areasForImprovement": ["string array (in {language})"],
  "suggestions": ["string array (in {language})"],
  "detailedExplanation": "string (in {language})",
  "keyConcepts": ["string array"],
  "misconceptions": ["string array (in {language})"],
  "confidenceLevel": "high|medium|low"
}}

Return only JSON. Do not add any other text."#,
        title = lesson.title,
        content = lesson.content,
        summary = lesson.summary,
    )
}

pub fn build_validation_prompt(
    lesson: &LessonContent,
    understanding: &str,
    questions: &[String],
    locale: Locale,
) -> String {
    let language = language_name(locale);
    let numbered = questions
        .iter()
        .enumerate()
        .map(|(i, question)| format!("{}. {}", i + 1, question))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert educational validator. Please validate the student's knowledge of the following lesson.

LESSON: {title}
CONTENT: {content}

STUDENT'S UNDERSTANDING: {understanding}

Please validate the student's knowledge by answering these questions:
{numbered}

Respond in JSON format ONLY (respond ONLY with valid JSON, do not include any explanation, markdown, or text outside the JSON):
{{
  "overallAccuracy": number (0-100),
  "questionResults": [
    {{
      "question": "string",
      "userAnswer": "extracted from student understanding",
      "isCorrect": boolean,
      "correctAnswer": "string",
      "explanation": "string (in {language})"
    }}
  ],
  "confidence": number (0-100)
}}

Return only JSON. Do not add any other text."#,
        title = lesson.title,
        content = lesson.content,
    )
}
