//! Plain-text lesson ingestion and the app's current-lesson state.

#[cfg(feature = "desktop")]
pub mod commands;
mod parser;

use std::path::PathBuf;

use thiserror::Error;

pub use parser::{
    count_words, estimate_read_time, extract_sections, generate_summary, parse_file, parse_text,
    parse_upload,
};

#[derive(Debug, Error)]
pub enum LessonError {
    /// Carries the rejected content type or extension.
    #[error("Currently only TXT files are supported. Please convert your file to TXT format.")]
    UnsupportedFileType(String),

    #[error("failed to read lesson file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
