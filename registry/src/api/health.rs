//! ヘルスチェックAPI

use axum::{extract::State, Json};
use controller_registry_common::protocol::HealthResponse;

use crate::AppState;

/// GET /api/health - 稼働状態とレコード件数
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.service.stats().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        controllers: stats.controllers,
        client_locations: stats.client_locations,
    })
}
