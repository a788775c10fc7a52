use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use veritas_core::errors::ServiceError;
use veritas_core::provider::TranscriptionService;
use veritas_core::security::ApiKey;
use veritas_core::types::TranscriptionResult;

const API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const DEFAULT_MODEL: &str = "whisper-1";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Verbose response from the transcription endpoint. `verbose_json` is
/// requested so the audio duration comes back alongside the text.
#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    duration: Option<f64>,
}

/// Whisper speech-to-text client over the multipart upload endpoint.
pub struct WhisperTranscriber {
    client: Client,
    api_key: ApiKey,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(api_key: ApiKey, model: Option<&str>) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }
}

#[async_trait]
impl TranscriptionService for WhisperTranscriber {
    fn name(&self) -> &str {
        "whisper"
    }

    #[instrument(skip(self), fields(audio = %audio.display(), model = %self.model))]
    async fn transcribe(&self, audio: &Path) -> Result<TranscriptionResult, ServiceError> {
        let bytes = tokio::fs::read(audio)
            .await
            .map_err(|e| ServiceError::Io(format!("read audio artifact: {e}")))?;

        let file_name = audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recording.webm")
            .to_string();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/webm")
            .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", part);

        let resp = self
            .client
            .post(API_URL)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.0.expose_secret()),
            )
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status, body));
        }

        let payload: VerboseTranscription = resp
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        Ok(TranscriptionResult {
            text: payload.text,
            // Absent duration (plain `json` format, API drift) degrades to
            // zero; the prompt builder's pace guard covers it.
            duration_seconds: payload.duration.unwrap_or(0.0).max(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn provider_properties() {
        let t = WhisperTranscriber::new(ApiKey(SecretString::from("k")), None);
        assert_eq!(t.name(), "whisper");
        assert_eq!(t.model, DEFAULT_MODEL);
    }

    #[test]
    fn verbose_response_with_duration() {
        let payload: VerboseTranscription =
            serde_json::from_str(r#"{"text":"hello there","duration":3.25,"language":"en"}"#)
                .unwrap();
        assert_eq!(payload.text, "hello there");
        assert_eq!(payload.duration, Some(3.25));
    }

    #[test]
    fn verbose_response_without_duration() {
        let payload: VerboseTranscription = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(payload.text, "hi");
        assert!(payload.duration.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let t = WhisperTranscriber::new(ApiKey(SecretString::from("k")), None);
        let err = t
            .transcribe(Path::new("/nonexistent/veritas-test.webm"))
            .await
            .unwrap_err();
        assert_eq!(err.error_kind(), "io");
    }
}
