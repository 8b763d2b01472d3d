//! Error types shared across mockview crates.
//!
//! `ProviderError` lives here rather than in `mockview-providers` so the
//! coach can downcast and classify failures for retry decisions without
//! string matching.

use thiserror::Error;

/// Errors raised by the scoring engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// The input cannot be scored (for example, no answers at all).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while driving an interview session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The submitted answer was empty or whitespace only.
    #[error("Please provide an answer")]
    EmptyAnswer,

    /// Every question already has an answer.
    #[error("interview already complete ({0} answers)")]
    AlreadyComplete(usize),

    /// The session was finalized before all questions were answered.
    #[error("interview incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    /// The session has no questions to ask.
    #[error("interview has no questions")]
    NoQuestions,

    /// The job role was blank.
    #[error("Please enter a job role")]
    MissingJobRole,

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Errors that can occur when interacting with a language-model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}
