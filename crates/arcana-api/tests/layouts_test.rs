//! Integration tests for layout resolution and board projection.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_resolve_line_three() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/layouts/resolve",
        &json!({ "kind": "line-3", "required_count": 3 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["fallback"], false);
    let positions = json["positions"].as_array().unwrap();
    let xs: Vec<f64> = positions.iter().map(|p| p["x"].as_f64().unwrap()).collect();
    assert_eq!(xs, [0.25, 0.5, 0.75]);
    assert!(positions.iter().all(|p| p["y"] == 0.5));
}

#[tokio::test]
async fn test_resolve_celtic_cross_overlaps_present_and_challenge() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/layouts/resolve",
        &json!({ "kind": "cross-10", "required_count": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let positions = json["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 10);
    assert_eq!(positions[0]["slot_key"], "present");
    assert_eq!(positions[1]["slot_key"], "challenge");
    assert_eq!(positions[0]["x"], positions[1]["x"]);
    assert_eq!(positions[0]["y"], positions[1]["y"]);
    assert_eq!(positions[1]["rot"], 90.0);
    assert!(positions[1]["z"].as_u64().unwrap() > positions[0]["z"].as_u64().unwrap());
}

#[tokio::test]
async fn test_resolve_prefers_authored_positions() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/layouts/resolve",
        &json!({
            "kind": "circle",
            "required_count": 2,
            "positions": [
                { "slotKey": "you", "cx": 20, "cy": 150 },
                { "slotKey": "them", "left": 0.8, "top": 0.5 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let positions = json["positions"].as_array().unwrap();
    assert_eq!(positions[0]["slot_key"], "you");
    assert_eq!(positions[0]["x"], 0.2);
    assert_eq!(positions[0]["y"], 0.98);
    assert_eq!(positions[1]["x"], 0.8);
}

#[tokio::test]
async fn test_resolve_unknown_kind_falls_back() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/layouts/resolve",
        &json!({ "kind": "spiral-of-doom", "required_count": 7 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["fallback"], true);
    assert_eq!(json["positions"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_resolve_zero_cards_is_400() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/layouts/resolve",
        &json!({ "kind": "line", "required_count": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_project_keeps_cards_inside_container() {
    // Arrange
    let app = common::build_test_app();
    let (_, resolved) = common::post_json(
        app.clone(),
        "/api/v1/layouts/resolve",
        &json!({ "kind": "circle", "required_count": 12 }),
    )
    .await;

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/layouts/project",
        &json!({
            "width": 800.0,
            "height": 600.0,
            "kind": "circle",
            "positions": resolved["positions"],
        }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let cards = json["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 12);
    for card in cards {
        let left = card["left"].as_f64().unwrap();
        let top = card["top"].as_f64().unwrap();
        let width = card["width"].as_f64().unwrap();
        let height = card["height"].as_f64().unwrap();
        assert!(width <= 140.0);
        assert!((height / width - 1.75).abs() < 1e-9);
        assert!(left >= 0.0 && left + width <= 800.0 + 1e-9);
        assert!(top >= 0.0 && top + height <= 600.0 + 1e-9);
    }
}
