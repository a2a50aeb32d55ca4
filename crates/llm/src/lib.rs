//! Cloud classification through the Gemini `generateContent` API
//!
//! [`GeminiClient`] walks an ordered model list, retrying only on rate-limit
//! and overload responses. [`CloudClassifier`] is the seam the service layer
//! depends on, so tests can swap in a canned classifier.

mod ai_types;
mod classify;
mod client;
mod error;


pub use classify::{CLASSIFY_PROMPT, CloudClassifier, parse_classification, strip_markdown_json};
pub use client::{
    ATTEMPTS_PER_MODEL, DEFAULT_BASE_URL, DEFAULT_MODELS, DEFAULT_RETRY_PAUSE, GeminiClient,
    truncate,
};
pub use error::LlmError;
