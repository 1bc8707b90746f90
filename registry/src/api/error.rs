//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング。
//! 業務エラー（未登録コントローラー等）はここを通らず、レスポンス本文のステータスで返す。

use axum::{http::StatusCode, response::IntoResponse, Json};
use controller_registry_common::error::RegistryError;
use serde_json::json;
use tracing::warn;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub RegistryError);

impl AppError {
    /// 必須フィールド欠落のエラー
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AppError(RegistryError::InvalidArgument(message.into()))
    }

    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            RegistryError::InvalidArgument(_) | RegistryError::Common(_) => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::ControllerNotFound(_)
            | RegistryError::ClientLocationNotFound(_)
            | RegistryError::UnregisteredController(_)
            | RegistryError::ReferentialIntegrity { .. } => StatusCode::NOT_FOUND,
            RegistryError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            RegistryError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        // 詳細はサーバーログにのみ出力する
        warn!(status = status.as_u16(), error = %self.0, "Request failed");

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
