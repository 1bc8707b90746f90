//! Contract Test: POST /rpc/BulkSetClientLocations

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{create_test_app, get_json, post_json};

#[tokio::test]
async fn test_bulk_set_updates_every_client() {
    let (app, _) = create_test_app();
    post_json(
        &app,
        "/rpc/RegisterController",
        json!({"controller_id": "ctrl-1", "grpc_address": "10.0.0.1:9090"}),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/rpc/BulkSetClientLocations",
        json!({"controller_id": "ctrl-1", "client_ids": ["a", "b", "c"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["error"], "");
    assert_eq!(body["updated_count"], 3);

    for client in ["a", "b", "c"] {
        let (_, body) = post_json(
            &app,
            "/rpc/GetClientLocation",
            json!({"client_id": client}),
        )
        .await;
        assert_eq!(body["controller_id"], "ctrl-1");
    }
}

#[tokio::test]
async fn test_bulk_set_empty_list_succeeds_without_controller() {
    let (app, _) = create_test_app();

    let (status, body) = post_json(
        &app,
        "/rpc/BulkSetClientLocations",
        json!({"controller_id": "ctrl-unknown", "client_ids": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["updated_count"], 0);
}

#[tokio::test]
async fn test_bulk_set_unknown_controller() {
    let (app, _) = create_test_app();

    let (status, body) = post_json(
        &app,
        "/rpc/BulkSetClientLocations",
        json!({"controller_id": "ctrl-unknown", "client_ids": ["a"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "controller not found");
    assert_eq!(body["updated_count"], 0);

    let (_, health) = get_json(&app, "/api/health").await;
    assert_eq!(health["client_locations"], 0);
}

#[tokio::test]
async fn test_bulk_set_skips_invalid_client_ids() {
    let (app, _) = create_test_app();
    post_json(
        &app,
        "/rpc/RegisterController",
        json!({"controller_id": "ctrl-1", "grpc_address": "10.0.0.1:9090"}),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/rpc/BulkSetClientLocations",
        json!({"controller_id": "ctrl-1", "client_ids": ["a", "", "b"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["updated_count"], 2);
}

#[tokio::test]
async fn test_bulk_set_requires_controller_id() {
    let (app, _) = create_test_app();

    let (status, _) = post_json(
        &app,
        "/rpc/BulkSetClientLocations",
        json!({"client_ids": ["a"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
