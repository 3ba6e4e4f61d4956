//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use arcana_core::clock::Clock;
use arcana_core::interpretation::InterpretationService;
use arcana_core::repository::SpreadRepository;
use arcana_core::rng::DeterministicRng;
use arcana_interpretation::application::gateway::InterpretationGateway;
use arcana_interpretation::domain::persona::{PersonaRegistry, StaticPersonaRegistry};
use arcana_session::domain::draw::DrawPolicy;
use arcana_test_support::{
    FixedClock, InMemorySpreadRepository, LocalizedDeckProvider, MockRng,
    StubInterpretationService, sample_spread,
};

use arcana_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// State with two spreads (`ppf-3` upright only, `celtic` with reversals), a
/// 22-card deck named per locale, and the given interpretation service and
/// personas.
pub fn test_state(
    service: Arc<dyn InterpretationService>,
    personas: Arc<dyn PersonaRegistry>,
) -> AppState {
    let spreads = InMemorySpreadRepository::new([
        sample_spread("ppf-3", 3, false, "line-3"),
        sample_spread("celtic", 10, true, "cross-10"),
    ]);
    state_with_spreads(Arc::new(spreads), service, personas)
}

/// Same as [`test_state`] but serving spreads from `spreads`.
pub fn state_with_spreads(
    spreads: Arc<dyn SpreadRepository>,
    service: Arc<dyn InterpretationService>,
    personas: Arc<dyn PersonaRegistry>,
) -> AppState {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    AppState::new(
        fixed_clock(),
        rng,
        spreads,
        Arc::new(LocalizedDeckProvider::new(22)),
        InterpretationGateway::new(service, personas),
        DrawPolicy::default(),
    )
}

/// Build the full app router with a stub interpretation service that always
/// answers, and an open persona registry.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(StubInterpretationService::new(
        "The cards speak.",
    )))
}

/// Build the full app router around `service`.
pub fn build_test_app_with(service: Arc<dyn InterpretationService>) -> Router {
    arcana_api::app(test_state(service, Arc::new(StaticPersonaRegistry::open())))
}

/// Build the full app router around a custom spread source.
pub fn build_test_app_with_spreads(spreads: Arc<dyn SpreadRepository>) -> Router {
    arcana_api::app(state_with_spreads(
        spreads,
        Arc::new(StubInterpretationService::new("The cards speak.")),
        Arc::new(StaticPersonaRegistry::open()),
    ))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Creates a session for `spread_id` and returns its id.
pub async fn open_session(app: &Router, spread_id: &str, locale: &str) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/sessions",
        &serde_json::json!({ "spread_id": spread_id, "locale": locale }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["session_id"].as_str().unwrap().to_string()
}

/// Selects `indices` in order and confirms.
pub async fn pick_and_confirm(app: &Router, session_id: &str, indices: &[usize]) {
    for index in indices {
        let (status, json) = post_json(
            app.clone(),
            &format!("/api/v1/sessions/{session_id}/select"),
            &serde_json::json!({ "index": index }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["applied"], true);
    }
    let (status, json) =
        post_empty(app.clone(), &format!("/api/v1/sessions/{session_id}/confirm")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["applied"], true);
}
