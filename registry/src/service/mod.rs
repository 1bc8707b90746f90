//! レジストリサービス
//!
//! レコードストアの上で入力検証と業務ルールを適用する。
//! クライアント所在は登録済みのコントローラーのみを参照できる。
//! サービス自身は状態を持たず、ストアへの参照のみを保持する。

use std::sync::Arc;

use controller_registry_common::error::{RegistryError, RegistryResult};
use controller_registry_common::types::{ClientLocationRecord, ControllerRecord};
use tracing::{debug, info, warn};

use crate::context::RequestContext;
use crate::store::{RecordStore, StoreStats};

/// 一括割り当ての要素毎の結果
#[derive(Debug)]
pub struct ClientOutcome {
    /// クライアントID
    pub client_id: String,
    /// 割り当て結果
    pub result: RegistryResult<()>,
}

impl ClientOutcome {
    /// 割り当てに成功したか
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 一括割り当ての結果
///
/// バッチ全体は原子的ではなく、要素毎に独立して適用される。
#[derive(Debug)]
pub struct BulkAssignment {
    /// 割り当て先コントローラーID
    pub controller_id: String,
    /// 成功件数
    pub updated_count: usize,
    /// 要素毎の結果（入力順）
    pub outcomes: Vec<ClientOutcome>,
}

impl BulkAssignment {
    fn empty(controller_id: &str) -> Self {
        Self {
            controller_id: controller_id.to_string(),
            updated_count: 0,
            outcomes: Vec::new(),
        }
    }

    /// 失敗した要素
    pub fn failures(&self) -> impl Iterator<Item = &ClientOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    /// 全要素が成功したか
    pub fn is_complete(&self) -> bool {
        self.updated_count == self.outcomes.len()
    }
}

/// レジストリサービス
#[derive(Clone)]
pub struct RegistryService {
    store: Arc<dyn RecordStore>,
}

impl RegistryService {
    /// ストアを指定してサービスを作成
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// コントローラーを登録
    ///
    /// 同じIDでの再登録はエンドポイントを置き換える（再起動後のアドレス変更に対応）。
    pub async fn register_controller(
        &self,
        ctx: &RequestContext,
        info: ControllerRecord,
    ) -> RegistryResult<()> {
        info!(
            controller_id = %info.id,
            endpoint = %info.endpoint,
            "Registering controller"
        );

        if info.id.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "controller ID cannot be empty".to_string(),
            ));
        }
        if info.endpoint.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "controller endpoint cannot be empty".to_string(),
            ));
        }

        self.store.put_controller(ctx, info).await
    }

    /// コントローラーを取得
    pub async fn get_controller(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
    ) -> RegistryResult<ControllerRecord> {
        self.store.get_controller(ctx, controller_id).await
    }

    /// コントローラーが登録済みか確認
    ///
    /// 不在は `false`、キャンセル等はエラーとして返す。
    pub async fn is_controller_registered(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
    ) -> RegistryResult<bool> {
        match self.store.get_controller(ctx, controller_id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => {
                debug!(controller_id, "Controller is not registered");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// クライアントを指定コントローラーに割り当てる
    ///
    /// コントローラーの存在を先に確認し、未登録なら
    /// `UnregisteredController` で失敗する（所在は変更されない）。
    pub async fn set_client_location(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        controller_id: &str,
    ) -> RegistryResult<()> {
        info!(client_id, controller_id, "Setting client location");

        if client_id.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "client ID cannot be empty".to_string(),
            ));
        }
        if controller_id.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "controller ID cannot be empty".to_string(),
            ));
        }

        self.ensure_controller(ctx, controller_id).await?;

        self.store
            .put_client_location(ctx, ClientLocationRecord::new(client_id, controller_id))
            .await
    }

    /// クライアント所在を取得
    pub async fn get_client_location(
        &self,
        ctx: &RequestContext,
        client_id: &str,
    ) -> RegistryResult<ClientLocationRecord> {
        let result = self.store.get_client_location(ctx, client_id).await;
        debug!(client_id, found = result.is_ok(), "Getting client location");
        result
    }

    /// クライアント所在と所属コントローラーを合わせて取得
    pub async fn resolve_client(
        &self,
        ctx: &RequestContext,
        client_id: &str,
    ) -> RegistryResult<(ClientLocationRecord, ControllerRecord)> {
        let location = self.get_client_location(ctx, client_id).await?;
        let controller = self.store.get_controller(ctx, &location.controller_id).await?;
        Ok((location, controller))
    }

    /// 複数クライアントを一括で同じコントローラーに割り当てる
    ///
    /// コントローラーの存在確認は一度だけ行い、以降の要素毎の失敗は
    /// ログに残して続行する。空リストは存在確認なしで0件成功とする。
    pub async fn bulk_set_client_locations(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
        client_ids: &[String],
    ) -> RegistryResult<BulkAssignment> {
        if controller_id.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "controller ID cannot be empty".to_string(),
            ));
        }
        if client_ids.is_empty() {
            return Ok(BulkAssignment::empty(controller_id));
        }

        self.ensure_controller(ctx, controller_id).await?;

        let mut assignment = BulkAssignment::empty(controller_id);
        for client_id in client_ids {
            let result = self.set_client_location(ctx, client_id, controller_id).await;
            match &result {
                Ok(()) => assignment.updated_count += 1,
                Err(e) => warn!(
                    client_id = %client_id,
                    controller_id,
                    error = %e,
                    "Failed to set location for client"
                ),
            }
            assignment.outcomes.push(ClientOutcome {
                client_id: client_id.clone(),
                result,
            });
        }

        info!(
            controller_id,
            updated = assignment.updated_count,
            requested = client_ids.len(),
            "Bulk client location update"
        );

        Ok(assignment)
    }

    /// コントローラーにクライアント一覧の再送を依頼する
    ///
    /// 現状はコントローラーの存在確認とログ出力のみで、コールバックは行わない。
    pub async fn request_client_refresh(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
    ) -> RegistryResult<ControllerRecord> {
        let controller = self.ensure_controller(ctx, controller_id).await?;
        info!(
            controller_id = %controller.id,
            endpoint = %controller.endpoint,
            "Client refresh requested"
        );
        Ok(controller)
    }

    /// レコード件数
    pub async fn stats(&self) -> StoreStats {
        self.store.stats().await
    }

    /// コントローラーの存在を確認し、不在なら `UnregisteredController` を返す
    async fn ensure_controller(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
    ) -> RegistryResult<ControllerRecord> {
        self.store
            .get_controller(ctx, controller_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    RegistryError::UnregisteredController(controller_id.to_string())
                } else {
                    e
                }
            })
    }
}
