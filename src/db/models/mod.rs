pub mod learning_session;

pub use learning_session::{
    HistoryPage, HistoryQuery, HistorySort, HistoryStats, LearningSession,
    LearningSessionUpdate, NewLearningSession, ALL_CATEGORIES, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
