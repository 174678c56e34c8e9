//! Diagnostics endpoint.
//!
//! # Responsibilities
//! - Serve `GET /health/custom` (and the `/app-health/custom` alias)
//! - Run the concurrent evaluator off the async runtime via spawn_blocking
//! - Map the rolled-up status to an HTTP status (200 for UP, 503 otherwise)
//!
//! # Design Decisions
//! - The engine stays synchronous; this module is the only async surface
//! - Evaluation failures (worker pool provisioning) are 500s, never panics

pub mod render;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::engine::concurrent::evaluate_concurrently;
use crate::status::Status;
use crate::tree::CheckNode;

pub use render::render;

/// Shared state for the diagnostics routes.
#[derive(Clone)]
pub struct AppState {
    pub root: Arc<CheckNode>,
    pub evaluation_timeout: Duration,
}

/// Build the diagnostics router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health/custom", get(custom_health))
        .route("/app-health/custom", get(custom_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until ctrl-c.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    tracing::info!(address = %listener.local_addr()?, "health endpoint listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
}

async fn custom_health(State(state): State<AppState>) -> impl IntoResponse {
    let root = Arc::clone(&state.root);
    let timeout = state.evaluation_timeout;
    let evaluated =
        tokio::task::spawn_blocking(move || evaluate_concurrently(&root, timeout)).await;

    match evaluated {
        Ok(Ok(tree)) => {
            let code = if tree.status() == Status::Up {
                StatusCode::OK
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            };
            (code, Json(render(&tree)))
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "health evaluation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": Status::Unknown.as_code(), "error": e.to_string() })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "health evaluation task aborted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": Status::Unknown.as_code() })),
            )
        }
    }
}
