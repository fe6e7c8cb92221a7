//! Chat provider trait definition

use crate::{ChatRequest, Completion, Result};
use async_trait::async_trait;

/// Trait for chat-completion backends
///
/// The pipeline orchestrator only depends on this trait, which keeps it
/// testable against stub providers and open to other OpenAI-compatible
/// endpoints.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate one completion for the request
    ///
    /// Exactly one completion is produced per call. Implementations must not
    /// retry on failure; retries, if desired, are the caller's responsibility.
    async fn complete(&self, request: ChatRequest) -> Result<Completion>;

    /// Get the provider name (e.g. "deepseek")
    fn name(&self) -> &str;
}
