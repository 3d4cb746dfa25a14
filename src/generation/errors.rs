use std::time::Duration;
use thiserror::Error;

/// Failures of the hosted model call itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The request never produced an HTTP response (DNS, connect, reset)
    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("model service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("model response contained no text")]
    EmptyResponse,

    /// A successful HTTP response whose body is not the expected envelope
    #[error("model response could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("model client misconfigured: {0}")]
    Configuration(String),
}

impl ModelError {
    /// Whether a retry has a reasonable chance of succeeding
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::EmptyResponse | Self::InvalidResponse(_) | Self::Configuration(_) => false,
        }
    }
}

/// Failures surfaced by the generation adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The model call failed (network, quota, service unavailable, timeout)
    #[error("Generation service error: {0}")]
    Service(#[from] ModelError),

    /// The model answered with text that is not a JSON object
    #[error("Model returned malformed JSON: {0}")]
    MalformedOutput(String),
}
