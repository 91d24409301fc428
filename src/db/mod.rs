//! SQLite persistence for learning sessions.

mod connection;
mod helpers;
mod migrations;
pub mod models;
mod repositories;

pub use connection::Database;
pub use models::{
    HistoryPage, HistoryQuery, HistorySort, HistoryStats, LearningSession, LearningSessionUpdate,
    NewLearningSession,
};
