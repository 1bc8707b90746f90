//! コントローラー関連のAPIハンドラー

use axum::{extract::State, Json};
use controller_registry_common::protocol::{
    ClientRefreshRequest, ClientRefreshResponse, IsControllerRegisteredRequest,
    IsControllerRegisteredResponse, RegisterControllerRequest, StatusResponse,
    CONTROLLER_NOT_FOUND, CONTROLLER_REGISTERED, REFRESH_REQUESTED,
};
use controller_registry_common::types::ControllerRecord;
use tracing::{debug, error, info};

use super::{require, AppError};
use crate::AppState;

/// POST /rpc/RegisterController - コントローラー登録
pub async fn register_controller(
    State(state): State<AppState>,
    Json(req): Json<RegisterControllerRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    require(&req.controller_id, "controller ID")?;
    require(&req.grpc_address, "controller gRPC address")?;

    let ctx = state.request_context();
    let record = ControllerRecord::new(req.controller_id, req.grpc_address);
    let controller_id = record.id.clone();

    match state.service.register_controller(&ctx, record).await {
        Ok(()) => {
            info!(controller_id = %controller_id, "Controller registered successfully");
            Ok(Json(StatusResponse::ok(CONTROLLER_REGISTERED)))
        }
        Err(e) if e.is_context_error() => Err(e.into()),
        Err(e) => {
            error!(controller_id = %controller_id, error = %e, "Failed to register controller");
            Ok(Json(StatusResponse::failed(e)))
        }
    }
}

/// POST /rpc/IsControllerRegistered - コントローラー登録確認
pub async fn is_controller_registered(
    State(state): State<AppState>,
    Json(req): Json<IsControllerRegisteredRequest>,
) -> Result<Json<IsControllerRegisteredResponse>, AppError> {
    require(&req.controller_id, "controller ID")?;

    let ctx = state.request_context();
    let registered = state
        .service
        .is_controller_registered(&ctx, &req.controller_id)
        .await?;

    Ok(Json(IsControllerRegisteredResponse { registered }))
}

/// POST /rpc/RequestClientRefresh - クライアント一覧の再送依頼
pub async fn request_client_refresh(
    State(state): State<AppState>,
    Json(req): Json<ClientRefreshRequest>,
) -> Result<Json<ClientRefreshResponse>, AppError> {
    require(&req.controller_id, "controller ID")?;

    let ctx = state.request_context();
    match state
        .service
        .request_client_refresh(&ctx, &req.controller_id)
        .await
    {
        Ok(_) => Ok(Json(ClientRefreshResponse {
            success: REFRESH_REQUESTED.to_string(),
            client_count: 0,
        })),
        Err(e) if e.is_unregistered_controller() => {
            debug!(
                controller_id = %req.controller_id,
                "Controller not found for refresh request"
            );
            Ok(Json(ClientRefreshResponse {
                success: StatusResponse::failed(CONTROLLER_NOT_FOUND).success,
                client_count: 0,
            }))
        }
        Err(e) => Err(e.into()),
    }
}
