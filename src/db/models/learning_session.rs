//! Persisted learning sessions and the history views built on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Category value that means "every category" in history filters.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningSession {
    pub id: String,
    pub user_id: String,
    pub lesson_title: String,
    pub lesson_content: String,
    pub user_understanding: String,
    pub ai_feedback: String,
    pub comprehension_score: u8,
    pub category: Option<String>,
    /// Minutes.
    pub time_spent: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLearningSession {
    pub user_id: String,
    pub lesson_title: String,
    pub lesson_content: String,
    pub user_understanding: String,
    pub ai_feedback: String,
    pub comprehension_score: u8,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub time_spent: Option<u32>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningSessionUpdate {
    pub lesson_title: Option<String>,
    pub user_understanding: Option<String>,
    pub ai_feedback: Option<String>,
    pub comprehension_score: Option<u8>,
    pub category: Option<String>,
    pub time_spent: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistorySort {
    /// Newest first.
    #[default]
    Date,
    /// Highest score first.
    Score,
    /// Alphabetical by lesson title, ignoring case.
    Title,
}

impl HistorySort {
    pub(crate) fn order_clause(self) -> &'static str {
        match self {
            HistorySort::Date => "created_at DESC, rowid DESC",
            HistorySort::Score => "comprehension_score DESC, created_at DESC, rowid DESC",
            HistorySort::Title => "title_key ASC, created_at DESC, rowid DESC",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryQuery {
    /// 1-based.
    pub page: u32,
    /// Clamped to `1..=MAX_PAGE_SIZE`.
    pub page_size: u32,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: HistorySort,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            category: None,
            sort_by: HistorySort::Date,
        }
    }
}

impl HistoryQuery {
    pub(crate) fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub(crate) fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty() && *category != ALL_CATEGORIES)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub sessions: Vec<LearningSession>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_sessions: u64,
    /// Rounded to one decimal; 0 with no sessions.
    pub average_score: f64,
    pub best_score: u8,
    pub total_minutes: u64,
}
