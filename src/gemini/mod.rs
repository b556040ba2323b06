//! Completion service seam. The lookup layer only sees the
//! [`CompletionService`] trait; [`GeminiClient`] is the production
//! implementation and tests plug in stubs.

mod client;
mod models;

use async_trait::async_trait;

use crate::error::CompletionResult;

pub use client::GeminiClient;
pub use models::{
    Candidate, CompletionRequest, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part, PromptFeedback,
};

/// Black-box text completion: prompt + schema in, JSON text out.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run a single schema-guided completion and return the raw response
    /// text, expected (but not guaranteed) to be JSON matching the schema.
    async fn generate_json(&self, request: &CompletionRequest) -> CompletionResult<String>;
}
