use std::path::Path;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::types::TranscriptionResult;

/// A single non-streaming text completion.
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    /// System instruction (persona).
    pub system: String,
    /// User prompt.
    pub user: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// External capability converting audio bytes to text plus duration.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    fn name(&self) -> &str;

    async fn transcribe(&self, audio: &Path) -> Result<TranscriptionResult, ServiceError>;
}

/// External capability converting a text prompt into free-form text output.
#[async_trait]
pub trait GenerationService: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ServiceError>;
}
