//! Routes for layout resolution and board projection.

use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use arcana_core::error::DomainError;
use arcana_core::spread::{RawPosition, SpreadPosition};
use arcana_layout::application::resolver::resolve_positions;
use arcana_layout::domain::kinds::LayoutKind;
use arcana_layout::domain::projection::{CardGeometry, CardSizing, ContainerSize, project_board};

use crate::error::ApiError;
use crate::state::AppState;

/// Largest card count a single request may ask for.
const MAX_REQUIRED_COUNT: usize = 500;

/// Request body for POST /resolve.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Layout kind name, e.g. `cross-10`.
    pub kind: String,
    pub required_count: usize,
    /// Authored positions; used when there are enough of them.
    #[serde(default)]
    pub positions: Option<Vec<RawPosition>>,
}

/// Response body for POST /resolve.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// `true` when the kind was not recognized.
    pub fallback: bool,
    pub positions: Vec<SpreadPosition>,
}

/// Request body for POST /project.
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    /// Container width in pixels.
    pub width: f64,
    /// Container height in pixels.
    pub height: f64,
    /// Layout kind, used for card sizing.
    pub kind: String,
    pub positions: Vec<SpreadPosition>,
}

/// Response body for POST /project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub cards: Vec<CardGeometry>,
}

fn check_count(count: usize) -> Result<(), DomainError> {
    if count == 0 || count > MAX_REQUIRED_COUNT {
        return Err(DomainError::Validation(format!(
            "required_count must be between 1 and {MAX_REQUIRED_COUNT}, got {count}"
        )));
    }
    Ok(())
}

/// POST /resolve
#[instrument(skip(request), fields(kind = %request.kind, required_count = request.required_count))]
async fn resolve(Json(request): Json<ResolveRequest>) -> Result<Json<ResolveResponse>, ApiError> {
    check_count(request.required_count)?;
    let kind = LayoutKind::parse(&request.kind);
    let positions = resolve_positions(&kind, request.required_count, request.positions.as_deref());
    debug!(positions = positions.len(), "layout resolved");

    Ok(Json(ResolveResponse {
        fallback: kind == LayoutKind::Fallback,
        positions,
    }))
}

/// POST /project
#[instrument(skip(request), fields(kind = %request.kind, cards = request.positions.len()))]
async fn project(Json(request): Json<ProjectRequest>) -> Result<Json<ProjectResponse>, ApiError> {
    check_count(request.positions.len())?;
    let kind = LayoutKind::parse(&request.kind);
    let sizing = CardSizing::for_kind(&kind, request.positions.len());
    let cards = project_board(
        ContainerSize::new(request.width, request.height),
        &request.positions,
        sizing,
    );

    Ok(Json(ProjectResponse { cards }))
}

/// Returns the router for layout operations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resolve", post(resolve))
        .route("/project", post(project))
}
