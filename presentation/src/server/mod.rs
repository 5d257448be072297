//! HTTP entry point
//!
//! `POST /api/chat` runs one session per request; `GET /api/health` probes
//! every node. Sessions share no mutable state, so requests are served
//! concurrently.

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::{AppState, ChatRequest, create_router};

use council_application::InferenceGateway;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Council HTTP server
///
/// Manages the axum server lifecycle, including graceful shutdown when
/// the cancellation token fires.
pub struct CouncilServer<G: InferenceGateway + 'static> {
    state: AppState<G>,
    host: String,
    port: u16,
}

impl<G: InferenceGateway + 'static> CouncilServer<G> {
    pub fn new(state: AppState<G>, host: impl Into<String>, port: u16) -> Self {
        Self {
            state,
            host: host.into(),
            port,
        }
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|e| ApiError::internal(format!("Failed to parse address: {}", e)))
    }

    /// Serve until `shutdown` is cancelled; in-flight requests are drained
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), ApiError> {
        let addr = self.socket_addr()?;
        let app = create_router(self.state);

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            error!("Failed to bind to {}: {:?}", addr, e);
            ApiError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;

        info!("Council API listening on: http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("Council API stopped");
        Ok(())
    }
}

/// Cancel `token` on Ctrl+C or SIGTERM
pub async fn shutdown_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix;
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received TERM signal");
            }
            Err(e) => {
                warn!("Failed to install TERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = token.cancelled() => return,
    }
    token.cancel();
}
