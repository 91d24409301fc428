use thiserror::Error;

/// Errors from configuring the analyzer. Analysis itself never fails.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Gemini API key not configured")]
    MissingApiKey,
}

/// Failures of one call to the generative model or of reading its answer.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No JSON object found in model response")]
    NoJson,

    #[error("Malformed JSON in model response: {0}")]
    Malformed(#[from] serde_json::Error),
}
