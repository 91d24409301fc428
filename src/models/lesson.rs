//! Lesson data produced by the text parser.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub title: String,
    pub content: String,
    pub level: u8,
}

/// A parsed lesson. Built once per upload and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
    pub title: String,
    pub content: String,
    pub sections: Vec<ContentSection>,
    pub summary: String,
    pub word_count: usize,
    /// Minutes, at 200 words per minute.
    pub estimated_read_time: usize,
}
