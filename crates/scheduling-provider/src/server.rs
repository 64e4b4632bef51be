//! HTTP server
//!
//! Exposes the provider endpoint and a liveness probe. Every reply of the
//! provider endpoint is HTTP 200 with a `ProviderResponse` envelope; failures
//! travel in `systemError`.

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::handler::BatchHandler;
use crate::lookup::{SchedulingLookup, SchedulingSource};
use axum::body::Body;
use axum::extract::State;
use axum::http::Method;
use axum::routing::{any, get};
use axum::{Json, Router};
use scheduling_provider_protocol::ProviderResponse;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Path of the provider endpoint
pub const PROVIDER_PATH: &str = "/";

/// Path of the liveness probe
pub const HEALTH_PATH: &str = "/healthz";

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    handler: BatchHandler,
    max_body_bytes: usize,
}

impl AppState {
    /// Create state resolving against the given scheduling source.
    pub fn new(source: Arc<dyn SchedulingSource>, max_body_bytes: usize) -> Self {
        Self {
            handler: BatchHandler::new(source),
            max_body_bytes,
        }
    }

    /// Create state talking to the scheduling service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let lookup = SchedulingLookup::from_config(config)?;
        info!(url = %lookup.url(), "scheduling service target");
        Ok(Self::new(Arc::new(lookup), config.max_body_bytes))
    }
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(PROVIDER_PATH, any(provide))
        .route(HEALTH_PATH, get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn provide(
    State(state): State<AppState>,
    method: Method,
    body: Body,
) -> Json<ProviderResponse> {
    let span = info_span!("provider_request", request_id = %Uuid::new_v4(), %method);

    async move {
        let result = state
            .handler
            .handle(&method, body, state.max_body_bytes)
            .await;
        let response = ProviderResponse::from(result);
        info!(?response, "sending response");
        Json(response)
    }
    .instrument(span)
    .await
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the address cannot be bound.
pub async fn serve(config: &ProviderConfig) -> Result<()> {
    let empty = config.upstream.empty_parts();
    if !empty.is_empty() {
        warn!(parts = ?empty, "scheduling service location has empty parts");
    }

    let app = router(AppState::from_config(config)?);

    let listener = TcpListener::bind(config.listen_addr.as_str()).await?;
    info!(addr = %listener.local_addr()?, "scheduling provider listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("scheduling provider stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
