//! Contract Test: POST /rpc/SetClientLocation, POST /rpc/GetClientLocation

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{create_test_app, post_json};

#[tokio::test]
async fn test_client_location_scenario() {
    let (app, _) = create_test_app();

    post_json(
        &app,
        "/rpc/RegisterController",
        json!({"controller_id": "ctrl-1", "grpc_address": "10.0.0.1:9090"}),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/rpc/SetClientLocation",
        json!({"client_id": "client-9", "controller_id": "ctrl-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], "client location set successfully");

    let (status, body) = post_json(
        &app,
        "/rpc/GetClientLocation",
        json!({"client_id": "client-9"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], true);
    assert_eq!(body["controller_id"], "ctrl-1");
    assert_eq!(body["controller_fqdn"], "10.0.0.1:9090");

    // 未登録コントローラーへの再割り当ては業務エラーとして返り、元の所在は維持される
    let (status, body) = post_json(
        &app,
        "/rpc/SetClientLocation",
        json!({"client_id": "client-9", "controller_id": "ctrl-missing"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let message = body["success"].as_str().unwrap();
    assert!(message.starts_with("failed: "), "unexpected status: {message}");
    assert!(message.contains("ctrl-missing"));

    let (_, body) = post_json(
        &app,
        "/rpc/GetClientLocation",
        json!({"client_id": "client-9"}),
    )
    .await;
    assert_eq!(body["found"], true);
    assert_eq!(body["controller_id"], "ctrl-1");
}

#[tokio::test]
async fn test_get_unknown_client_location() {
    let (app, _) = create_test_app();

    let (status, body) = post_json(
        &app,
        "/rpc/GetClientLocation",
        json!({"client_id": "client-unknown"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], false);
    assert_eq!(body["controller_id"], "");
}

#[tokio::test]
async fn test_set_client_location_requires_both_ids() {
    let (app, _) = create_test_app();

    let (status, _) = post_json(
        &app,
        "/rpc/SetClientLocation",
        json!({"client_id": "client-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/rpc/SetClientLocation",
        json!({"client_id": "", "controller_id": "ctrl-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/rpc/GetClientLocation", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
