//! Pre-programmed service implementations for deterministic testing
//! without API calls.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use veritas_core::errors::ServiceError;
use veritas_core::provider::{CompletionRequest, GenerationService, TranscriptionService};
use veritas_core::types::TranscriptionResult;

/// Mock transcriber that returns pre-programmed results in sequence.
pub struct MockTranscriber {
    responses: Vec<Result<TranscriptionResult, ServiceError>>,
    call_count: AtomicUsize,
}

impl MockTranscriber {
    pub fn new(responses: Vec<Result<TranscriptionResult, ServiceError>>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Convenience: a single successful transcription.
    pub fn text(text: &str, duration_seconds: f64) -> Self {
        Self::new(vec![Ok(TranscriptionResult {
            text: text.to_string(),
            duration_seconds,
        })])
    }

    /// Convenience: a single failing transcription.
    pub fn failing(error: ServiceError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TranscriptionService for MockTranscriber {
    fn name(&self) -> &str {
        "mock-transcriber"
    }

    async fn transcribe(&self, _audio: &Path) -> Result<TranscriptionResult, ServiceError> {
        let idx = self.call_count.fetch_add(1, Ordering::Relaxed);
        self.responses.get(idx).cloned().unwrap_or_else(|| {
            Err(ServiceError::InvalidRequest(format!(
                "MockTranscriber: no response configured for call {idx}"
            )))
        })
    }
}

/// Mock completer that returns pre-programmed raw texts in sequence.
pub struct MockCompleter {
    responses: Vec<Result<String, ServiceError>>,
    call_count: AtomicUsize,
}

impl MockCompleter {
    pub fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Convenience: a single successful completion.
    pub fn text(raw: &str) -> Self {
        Self::new(vec![Ok(raw.to_string())])
    }

    /// Convenience: a single failing completion.
    pub fn failing(error: ServiceError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GenerationService for MockCompleter {
    fn name(&self) -> &str {
        "mock-completer"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ServiceError> {
        let idx = self.call_count.fetch_add(1, Ordering::Relaxed);
        self.responses.get(idx).cloned().unwrap_or_else(|| {
            Err(ServiceError::InvalidRequest(format!(
                "MockCompleter: no response configured for call {idx}"
            )))
        })
    }
}
