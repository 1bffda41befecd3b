//! Seam for the external text-generation capability. The pipeline only ever
//! talks to the `TextGenerator` trait so tests can script responses
//! deterministically.

pub mod openai;

use std::future::Future;

pub use openai::OpenAiGenerator;

/// Failure modes of a generation call. These are caught at the section level
/// and degrade to needs-review placeholders; they never abort a batch.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation call timed out")]
    Timeout,
    #[error("generation service returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed generation output: {0}")]
    Malformed(String),
}

/// Stateless, idempotent-per-call text generation. `max_output_units` is the
/// caller-derived budget (roughly word-sized units); implementations map it
/// onto their own token accounting. No determinism is guaranteed.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        max_output_units: u32,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}
