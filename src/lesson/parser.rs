use std::{fs, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::concepts::sentences;
use crate::lesson::LessonError;
use crate::log_debug;
use crate::models::{ContentSection, LessonContent};

const ENABLE_LOGS: bool = true;

const WORDS_PER_MINUTE: usize = 200;
const SUMMARY_SENTENCES: usize = 3;
const PLAIN_TEXT: &str = "text/plain";

static HEADER_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"^#{1,6}\s").expect("Valid markdown header regex"),
        Regex::new(r"^\d+\.\s").expect("Valid numbered header regex"),
        Regex::new(r"^[A-Z][A-Z\s]+$").expect("Valid caps header regex"),
        Regex::new(r"^[A-Z][a-z]+(\s+[A-Z][a-z]+)*$").expect("Valid title case header regex"),
    ]
});

static HEADER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[#\d.\s]+").expect("Valid header prefix regex"));

/// Parse an uploaded file. Only plain text is accepted: content type
/// `text/plain`, or no content type and a `.txt` name.
pub fn parse_upload(
    file_name: &str,
    content_type: &str,
    text: &str,
) -> Result<LessonContent, LessonError> {
    let content_type = content_type.trim();
    let accepted = if content_type.is_empty() {
        has_txt_extension(Path::new(file_name))
    } else {
        content_type.eq_ignore_ascii_case(PLAIN_TEXT)
    };

    if !accepted {
        let rejected = if content_type.is_empty() {
            file_name.to_string()
        } else {
            content_type.to_string()
        };
        return Err(LessonError::UnsupportedFileType(rejected));
    }

    Ok(parse_text(strip_extension(file_name), text))
}

/// Parse a `.txt` lesson from disk.
pub fn parse_file(path: &Path) -> Result<LessonContent, LessonError> {
    if !has_txt_extension(path) {
        return Err(LessonError::UnsupportedFileType(path.display().to_string()));
    }

    let text = fs::read_to_string(path).map_err(|source| LessonError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(parse_text(&title, &text))
}

pub fn parse_text(title: &str, text: &str) -> LessonContent {
    let content = text.trim().to_string();
    let word_count = count_words(&content);
    let sections = extract_sections(&content);

    log_debug!(
        "Parsed lesson {:?}: {} words, {} sections",
        title,
        word_count,
        sections.len()
    );

    LessonContent {
        title: title.to_string(),
        sections,
        summary: generate_summary(&content),
        word_count,
        estimated_read_time: estimate_read_time(word_count),
        content,
    }
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// "notes.v2.txt" -> "notes.v2". A leading dot alone is not an extension.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) if index > 0 && !file_name[index + 1..].contains('/') => &file_name[..index],
        _ => file_name,
    }
}

fn is_header(line: &str) -> bool {
    HEADER_PATTERNS.iter().any(|pattern| pattern.is_match(line))
}

fn header_level(line: &str) -> u8 {
    if HEADER_PATTERNS[0].is_match(line) {
        line.chars().take_while(|c| *c == '#').count() as u8
    } else {
        1
    }
}

/// Split content into header-delimited sections.
///
/// Lines before the first header belong to no section. Content without any
/// header becomes one section titled "Content".
pub fn extract_sections(content: &str) -> Vec<ContentSection> {
    let mut sections = Vec::new();
    let mut current: Option<ContentSection> = None;

    for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if is_header(line) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(ContentSection {
                title: HEADER_PREFIX.replace(line, "").trim().to_string(),
                content: String::new(),
                level: header_level(line),
            });
        } else if let Some(section) = current.as_mut() {
            if !section.content.is_empty() {
                section.content.push('\n');
            }
            section.content.push_str(line);
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    if sections.is_empty() {
        sections.push(ContentSection {
            title: "Content".to_string(),
            content: content.to_string(),
            level: 1,
        });
    }

    sections
}

pub fn generate_summary(content: &str) -> String {
    let picked: Vec<&str> = sentences(content).take(SUMMARY_SENTENCES).collect();
    if picked.is_empty() {
        return String::new();
    }
    format!("{}.", picked.join(". "))
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn estimate_read_time(word_count: usize) -> usize {
    (word_count + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE
}
