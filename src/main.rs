use std::path::PathBuf;
use std::sync::Arc;

use veritas_core::security::ApiKey;
use veritas_engine::Analyzer;
use veritas_llm::{ChatCompleter, WhisperTranscriber};
use veritas_server::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting veritas server");

    let port = std::env::var("VERITAS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let upload_dir = std::env::var("VERITAS_UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("uploads"));

    // A missing credential disables analysis, not the whole server: health
    // and challenge keep answering.
    let analyzer = match ApiKey::from_env("OPENAI_API_KEY") {
        Some(key) => {
            let transcription = Arc::new(WhisperTranscriber::new(key.clone(), None));
            let generation = Arc::new(ChatCompleter::new(key, None));
            Some(Arc::new(Analyzer::new(transcription, generation)))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set; /api/analyze is disabled");
            None
        }
    };

    let config = ServerConfig { port, upload_dir };
    let handle = veritas_server::start(config, analyzer)
        .await
        .expect("Failed to start server");

    tracing::info!(port = handle.port, "veritas ready");

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");

    tracing::info!("Shutting down");
}
