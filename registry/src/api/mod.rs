//! リモート呼び出しAPIハンドラー
//!
//! 各リモート操作を1つのPOSTルートとして公開し、JSONで送受信する。
//! 必須フィールドの検証はここで行い、業務エラーはレスポンス本文で返す。

pub mod clients;
pub mod controllers;
pub mod error;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;
pub use error::AppError;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/rpc/RegisterController",
            post(controllers::register_controller),
        )
        .route(
            "/rpc/IsControllerRegistered",
            post(controllers::is_controller_registered),
        )
        .route(
            "/rpc/RequestClientRefresh",
            post(controllers::request_client_refresh),
        )
        .route("/rpc/GetClientLocation", post(clients::get_client_location))
        .route("/rpc/SetClientLocation", post(clients::set_client_location))
        .route(
            "/rpc/BulkSetClientLocations",
            post(clients::bulk_set_client_locations),
        )
        .route("/api/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 必須フィールドが空でないことを確認
pub(crate) fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::invalid_argument(format!("{field} cannot be empty")));
    }
    Ok(())
}
