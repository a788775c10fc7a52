/// Typed errors from the external transcription and generation services.
/// Classifies upstream HTTP failures so the caller can log a stable kind.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("io error: {0}")]
    Io(String),
}

impl ServiceError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::InvalidRequest(_) => "invalid_request",
            Self::RateLimited(_) => "rate_limited",
            Self::ServerError { .. } => "server_error",
            Self::NetworkError(_) => "network_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Io(_) => "io",
        }
    }

    /// Classify an HTTP status code into the appropriate error variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(body),
            400 => Self::InvalidRequest(body),
            429 => Self::RateLimited(body),
            500..=599 => Self::ServerError { status, body },
            _ => Self::InvalidRequest(format!("unexpected status {status}: {body}")),
        }
    }
}

/// Errors surfaced by the analyze pipeline.
///
/// Parse degradation is deliberately absent: the result parser always
/// succeeds with a best-effort record instead of raising.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// No API credential was configured; analysis is disabled.
    #[error("API not configured")]
    NotConfigured,
    /// The request carried no audio payload.
    #[error("No audio file provided")]
    NoAudio,
    #[error("transcription failed: {0}")]
    Transcription(ServiceError),
    #[error("generation failed: {0}")]
    Generation(ServiceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzeError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::NoAudio => "no_audio",
            Self::Transcription(_) => "transcription",
            Self::Generation(_) => "generation",
            Self::Io(_) => "io",
        }
    }
}
