//! クライアント所在関連のAPIハンドラー

use axum::{extract::State, Json};
use controller_registry_common::protocol::{
    BulkSetClientLocationsRequest, BulkSetClientLocationsResponse, ClientLocationRequest,
    ClientLocationResponse, SetClientLocationRequest, StatusResponse, CLIENT_LOCATION_SET,
    CONTROLLER_NOT_FOUND,
};
use tracing::{debug, error, info};

use super::{require, AppError};
use crate::AppState;

/// POST /rpc/GetClientLocation - クライアント所在照会
///
/// 所在が未記録、または所属コントローラーが見つからない場合は `found: false` を返す。
pub async fn get_client_location(
    State(state): State<AppState>,
    Json(req): Json<ClientLocationRequest>,
) -> Result<Json<ClientLocationResponse>, AppError> {
    require(&req.client_id, "client ID")?;

    let ctx = state.request_context();
    match state.service.resolve_client(&ctx, &req.client_id).await {
        Ok((location, controller)) => Ok(Json(ClientLocationResponse {
            found: true,
            controller_id: location.controller_id,
            controller_fqdn: controller.endpoint,
        })),
        Err(e) if e.is_not_found() => {
            debug!(client_id = %req.client_id, error = %e, "Client location not found");
            Ok(Json(ClientLocationResponse::not_found()))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /rpc/SetClientLocation - クライアント所在設定
pub async fn set_client_location(
    State(state): State<AppState>,
    Json(req): Json<SetClientLocationRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    require(&req.client_id, "client ID")?;
    require(&req.controller_id, "controller ID")?;

    let ctx = state.request_context();
    match state
        .service
        .set_client_location(&ctx, &req.client_id, &req.controller_id)
        .await
    {
        Ok(()) => {
            info!(
                client_id = %req.client_id,
                controller_id = %req.controller_id,
                "Client location set"
            );
            Ok(Json(StatusResponse::ok(CLIENT_LOCATION_SET)))
        }
        Err(e) if e.is_context_error() => Err(e.into()),
        Err(e) => {
            error!(client_id = %req.client_id, error = %e, "Failed to set client location");
            Ok(Json(StatusResponse::failed(e)))
        }
    }
}

/// POST /rpc/BulkSetClientLocations - クライアント所在一括設定
///
/// 要素毎の失敗は件数にのみ反映される。コントローラー未登録の場合のみ `success: false`。
pub async fn bulk_set_client_locations(
    State(state): State<AppState>,
    Json(req): Json<BulkSetClientLocationsRequest>,
) -> Result<Json<BulkSetClientLocationsResponse>, AppError> {
    require(&req.controller_id, "controller ID")?;

    let ctx = state.request_context();
    match state
        .service
        .bulk_set_client_locations(&ctx, &req.controller_id, &req.client_ids)
        .await
    {
        Ok(assignment) => Ok(Json(BulkSetClientLocationsResponse {
            success: true,
            error: String::new(),
            updated_count: i32::try_from(assignment.updated_count).unwrap_or(i32::MAX),
        })),
        Err(e) if e.is_unregistered_controller() => {
            error!(
                controller_id = %req.controller_id,
                "Controller not found for bulk client update"
            );
            Ok(Json(BulkSetClientLocationsResponse {
                success: false,
                error: CONTROLLER_NOT_FOUND.to_string(),
                updated_count: 0,
            }))
        }
        Err(e) => Err(e.into()),
    }
}
