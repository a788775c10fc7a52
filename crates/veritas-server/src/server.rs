use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use veritas_engine::Analyzer;

use crate::handlers;
use crate::uploads;

/// Upload cap for a single recording. Requests past this are rejected
/// before processing.
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration.
pub struct ServerConfig {
    pub port: u16,
    pub upload_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API credential was configured at startup. Health and
    /// challenge keep working; analyze reports the missing configuration.
    pub analyzer: Option<Arc<Analyzer>>,
    pub upload_dir: PathBuf,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/challenge", get(handlers::challenge))
        .route("/api/analyze", post(handlers::analyze))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Prepare the uploads directory, bind, and start serving. Returns a
/// handle holding the serve task.
pub async fn start(
    config: ServerConfig,
    analyzer: Option<Arc<Analyzer>>,
) -> Result<ServerHandle, std::io::Error> {
    uploads::prepare_upload_dir(&config.upload_dir)?;

    let state = AppState {
        analyzer,
        upload_dir: config.upload_dir,
    };
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "veritas server started");

    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server,
    })
}

/// Handle returned by `start()` — keeps the serve task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn upload_cap_is_25mb() {
        assert_eq!(MAX_AUDIO_BYTES, 25 * 1024 * 1024);
    }

    #[test]
    fn build_router_creates_routes() {
        let state = AppState {
            analyzer: None,
            upload_dir: PathBuf::from("uploads"),
        };
        let _router = build_router(state);
        // If this doesn't panic, the router was built successfully
    }
}
