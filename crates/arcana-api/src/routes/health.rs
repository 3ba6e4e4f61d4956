//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when spreads can be served, `degraded` otherwise.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Spreads in the catalog; zero when the catalog is unreachable.
    pub spreads: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let spreads = match state.spreads.count_spreads().await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "spread catalog unavailable");
            0
        }
    };

    Json(HealthResponse {
        status: if spreads > 0 { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        spreads,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
