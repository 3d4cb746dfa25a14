//! Structured generation
//!
//! - [`client`] - the model client seam and its request/response types
//! - [`gemini`] - production client for the hosted Gemini REST API
//! - [`prompts`] - per-variant prompt construction
//! - [`resilience`] - optional timeout and bounded retry around the model call
//! - [`adapter`] - prompt → model → JSON object pipeline used by the HTTP layer

pub mod adapter;
pub mod client;
pub mod errors;
pub mod gemini;
pub mod prompts;
pub mod resilience;

pub use adapter::{parse_generation_output, GenerationAdapter};
pub use client::{ModelClient, ModelConfig, ModelResponse};
pub use errors::{GenerationError, ModelError};
pub use gemini::GeminiModelClient;
pub use resilience::RetryPolicy;
