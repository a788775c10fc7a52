//! HTTP handlers for the three API routes.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use veritas_core::challenge::Challenge;
use veritas_core::errors::AnalyzeError;
use veritas_core::types::{AnalysisMode, AnalysisVerdict};
use veritas_engine::Analysis;

use crate::server::AppState;
use crate::uploads::TempArtifact;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "veritas is listening" }))
}

/// GET /api/challenge
pub async fn challenge() -> Json<Challenge> {
    Json(Challenge::random())
}

/// Wire shape of a successful analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub transcript: String,
    pub duration: f64,
    #[serde(flatten)]
    pub verdict: AnalysisVerdict,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            success: true,
            transcript: analysis.transcript,
            duration: analysis.duration_seconds,
            verdict: analysis.verdict,
        }
    }
}

/// POST /api/analyze (multipart: `audio`, `mode`, `prompt`)
pub async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    // The configuration check runs before the body is read, so a missing
    // credential never touches the uploads directory.
    let Some(analyzer) = state.analyzer.clone() else {
        return error_response(&AnalyzeError::NotConfigured);
    };

    let mut audio: Option<Vec<u8>> = None;
    let mut mode = AnalysisMode::Standard;
    let mut challenge_prompt: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(e),
        };
        match field.name().unwrap_or_default() {
            "audio" => match field.bytes().await {
                Ok(bytes) => audio = Some(bytes.to_vec()),
                Err(e) => return multipart_error(e),
            },
            "mode" => {
                if let Ok(value) = field.text().await {
                    mode = AnalysisMode::from_field(&value);
                }
            }
            "prompt" => {
                if let Ok(value) = field.text().await {
                    if !value.trim().is_empty() {
                        challenge_prompt = Some(value);
                    }
                }
            }
            _ => {}
        }
    }

    let Some(audio) = audio.filter(|bytes| !bytes.is_empty()) else {
        return error_response(&AnalyzeError::NoAudio);
    };

    let artifact = match TempArtifact::create(&state.upload_dir, &audio) {
        Ok(artifact) => artifact,
        Err(e) => return error_response(&AnalyzeError::Io(e)),
    };

    let result = analyzer
        .analyze(artifact.path(), mode, challenge_prompt.as_deref())
        .await;
    // The recording is removed here, before any response goes out, on
    // success and failure alike.
    drop(artifact);

    match result {
        Ok(analysis) => (StatusCode::OK, Json(AnalyzeResponse::from(analysis))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, kind = e.error_kind(), "analysis failed");
            error_response(&e)
        }
    }
}

fn error_response(err: &AnalyzeError) -> Response {
    let (status, body) = match err {
        AnalyzeError::NotConfigured => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": "API not configured",
                "message": "set OPENAI_API_KEY to enable analysis",
            }),
        ),
        AnalyzeError::NoAudio => (
            StatusCode::BAD_REQUEST,
            json!({ "error": "No audio file provided" }),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": "Analysis failed",
                "message": other.to_string(),
            }),
        ),
    };
    (status, Json(body)).into_response()
}

/// Oversized or malformed multipart bodies are a client problem.
fn multipart_error(err: MultipartError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Analysis failed",
            "message": err.to_string(),
        })),
    )
        .into_response()
}
