//! Arcana — HTTP host.
//!
//! Serves layout resolution, board projection, and reading sessions over a
//! JSON API.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

/// Builds the application router with all route groups mounted.
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/layouts", routes::layouts::router())
        .nest("/api/v1/sessions", routes::sessions::router())
        .with_state(state)
}
