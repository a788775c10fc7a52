use std::path::Path;
use std::sync::Arc;

use tracing::instrument;

use veritas_core::errors::AnalyzeError;
use veritas_core::provider::{CompletionRequest, GenerationService, TranscriptionService};
use veritas_core::types::{AnalysisMode, AnalysisVerdict};

use crate::parser;
use crate::persona;
use crate::prompt;

/// Result of a full analysis pass: the normalized verdict plus the
/// transcript it was based on.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub transcript: String,
    pub duration_seconds: f64,
    pub verdict: AnalysisVerdict,
}

/// Sequences transcription, prompt construction, generation, and parsing.
///
/// Holds no per-request state. A failure at either external call aborts
/// the request — there are no retries and no partial results. Artifact
/// cleanup is the caller's scope guard, not this type's concern.
pub struct Analyzer {
    transcription: Arc<dyn TranscriptionService>,
    generation: Arc<dyn GenerationService>,
}

impl Analyzer {
    pub fn new(
        transcription: Arc<dyn TranscriptionService>,
        generation: Arc<dyn GenerationService>,
    ) -> Self {
        Self {
            transcription,
            generation,
        }
    }

    #[instrument(skip(self, audio, challenge_prompt), fields(mode = ?mode))]
    pub async fn analyze(
        &self,
        audio: &Path,
        mode: AnalysisMode,
        challenge_prompt: Option<&str>,
    ) -> Result<Analysis, AnalyzeError> {
        let transcription = self
            .transcription
            .transcribe(audio)
            .await
            .map_err(AnalyzeError::Transcription)?;
        tracing::debug!(
            chars = transcription.text.len(),
            duration = transcription.duration_seconds,
            "transcription complete"
        );

        let user = prompt::build_prompt(
            &transcription.text,
            transcription.duration_seconds,
            mode,
            challenge_prompt,
        );
        let request = CompletionRequest {
            system: persona::SYSTEM_PERSONA.to_string(),
            user,
            temperature: persona::TEMPERATURE,
            max_tokens: persona::MAX_TOKENS,
        };

        let raw = self
            .generation
            .complete(&request)
            .await
            .map_err(AnalyzeError::Generation)?;

        let verdict = parser::parse_verdict(&raw, mode);
        tracing::debug!(
            verdict = verdict.verdict.as_str(),
            confidence = verdict.confidence,
            "verdict parsed"
        );

        Ok(Analysis {
            transcript: transcription.text,
            duration_seconds: transcription.duration_seconds,
            verdict,
        })
    }
}
