//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from Gemini API operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no candidate text returned")]
    EmptyResponse,
    #[error("malformed classification: {0}")]
    MalformedClassification(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all models exhausted after {attempts} attempts, last error: {last}")]
    ModelsExhausted { attempts: usize, last: Box<LlmError> },
}

impl LlmError {
    /// Whether this failure is a rate-limit or overload response.
    ///
    /// Only these are retried; anything else aborts the fallback loop.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::HttpStatus { code: 429 | 503, .. })
    }

    /// Whether the quota was hit, directly or as the last failure before
    /// the model list ran out.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::HttpStatus { code, .. } => *code == 429,
            Self::ModelsExhausted { last, .. } => last.is_rate_limited(),
            _ => false,
        }
    }
}
