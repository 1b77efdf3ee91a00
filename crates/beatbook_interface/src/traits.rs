//! Trait definitions for text-generation backends.

use async_trait::async_trait;
use beatbook_core::{GenerateRequest, GenerateResponse};
use beatbook_error::BeatbookResult;

/// Core trait that every text-generation backend implements.
///
/// One call is one prompt and one response. Implementations must not retry:
/// a failure is reported once and the calling stage decides what it means.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a response for a single prompt.
    async fn generate(&self, req: &GenerateRequest) -> BeatbookResult<GenerateResponse>;

    /// Provider name (e.g., "llm-cli").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier, if one is configured.
    fn model_name(&self) -> Option<&str>;
}
