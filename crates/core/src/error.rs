use thiserror::Error;

/// Errors raised by core domain parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown tier: {0}")]
    InvalidTier(String),
}
