//! Contract Test: POST /rpc/RegisterController, POST /rpc/IsControllerRegistered

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{create_test_app, get_json, post_json};

#[tokio::test]
async fn test_register_controller_returns_status_message() {
    let (app, _) = create_test_app();

    let (status, body) = post_json(
        &app,
        "/rpc/RegisterController",
        json!({"controller_id": "ctrl-1", "grpc_address": "10.0.0.1:9090"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], "controller registered successfully");

    let (status, body) = post_json(
        &app,
        "/rpc/IsControllerRegistered",
        json!({"controller_id": "ctrl-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], true);
}

#[tokio::test]
async fn test_register_controller_missing_fields_is_invalid_argument() {
    let (app, _) = create_test_app();

    let (status, body) = post_json(
        &app,
        "/rpc/RegisterController",
        json!({"controller_id": "ctrl-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid argument");

    let (status, _) = post_json(
        &app,
        "/rpc/RegisterController",
        json!({"controller_id": "", "grpc_address": "10.0.0.1:9090"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reregistration_replaces_endpoint() {
    let (app, _) = create_test_app();

    for address in ["10.0.0.1:9090", "10.0.0.2:9191"] {
        let (status, _) = post_json(
            &app,
            "/rpc/RegisterController",
            json!({"controller_id": "ctrl-1", "grpc_address": address}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    post_json(
        &app,
        "/rpc/SetClientLocation",
        json!({"client_id": "client-1", "controller_id": "ctrl-1"}),
    )
    .await;
    let (_, body) = post_json(
        &app,
        "/rpc/GetClientLocation",
        json!({"client_id": "client-1"}),
    )
    .await;
    assert_eq!(body["controller_fqdn"], "10.0.0.2:9191");

    let (_, health) = get_json(&app, "/api/health").await;
    assert_eq!(health["controllers"], 1);
}

#[tokio::test]
async fn test_is_controller_registered_unknown() {
    let (app, _) = create_test_app();

    let (status, body) = post_json(
        &app,
        "/rpc/IsControllerRegistered",
        json!({"controller_id": "ctrl-unknown"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], false);

    let (status, _) = post_json(&app, "/rpc/IsControllerRegistered", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_requests_after_shutdown_are_rejected() {
    let (app, state) = create_test_app();
    state.shutdown.cancel();

    let (status, body) = post_json(
        &app,
        "/rpc/RegisterController",
        json!({"controller_id": "ctrl-1", "grpc_address": "10.0.0.1:9090"}),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Request cancelled");

    let (_, health) = get_json(&app, "/api/health").await;
    assert_eq!(health["controllers"], 0);
}
