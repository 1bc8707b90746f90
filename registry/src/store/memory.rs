//! インメモリのレコードストア
//!
//! コレクション毎に独立した `RwLock` を持ち、一方への書き込みが
//! もう一方の読み書きをブロックしない。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use controller_registry_common::error::{RegistryError, RegistryResult};
use controller_registry_common::types::{ClientLocationRecord, ControllerRecord};
use tokio::sync::RwLock;
use tracing::debug;

use super::{RecordStore, StoreStats};
use crate::context::RequestContext;

/// インメモリのレコードストア
///
/// プロセスの生存期間中のみ保持する。容量上限・削除・永続化はない。
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    /// コントローラーID → コントローラー
    controllers: Arc<RwLock<HashMap<String, ControllerRecord>>>,
    /// クライアントID → クライアント所在
    client_locations: Arc<RwLock<HashMap<String, ClientLocationRecord>>>,
}

impl InMemoryRecordStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put_controller(
        &self,
        ctx: &RequestContext,
        record: ControllerRecord,
    ) -> RegistryResult<()> {
        ctx.check()?;
        let mut controllers = self.controllers.write().await;
        // ロック待ちの間にキャンセルされた場合は書き込まない
        ctx.check()?;
        controllers.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get_controller(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
    ) -> RegistryResult<ControllerRecord> {
        ctx.check()?;
        self.controllers
            .read()
            .await
            .get(controller_id)
            .cloned()
            .ok_or_else(|| RegistryError::ControllerNotFound(controller_id.to_string()))
    }

    async fn put_client_location(
        &self,
        ctx: &RequestContext,
        record: ClientLocationRecord,
    ) -> RegistryResult<()> {
        ctx.check()?;

        // 存在確認はコントローラー側のロックで行い、所在側の書き込みとは原子的ではない。
        // 削除操作がないため、確認後に存在しなくなることはない。
        let controller_exists = self
            .controllers
            .read()
            .await
            .contains_key(&record.controller_id);
        if !controller_exists {
            debug!(
                client_id = %record.client_id,
                controller_id = %record.controller_id,
                "Rejected client location for unknown controller"
            );
            return Err(RegistryError::ReferentialIntegrity {
                client_id: record.client_id,
                controller_id: record.controller_id,
            });
        }

        let mut locations = self.client_locations.write().await;
        ctx.check()?;
        locations.insert(record.client_id.clone(), record);
        Ok(())
    }

    async fn get_client_location(
        &self,
        ctx: &RequestContext,
        client_id: &str,
    ) -> RegistryResult<ClientLocationRecord> {
        ctx.check()?;
        self.client_locations
            .read()
            .await
            .get(client_id)
            .cloned()
            .ok_or_else(|| RegistryError::ClientLocationNotFound(client_id.to_string()))
    }

    async fn stats(&self) -> StoreStats {
        let controllers = self.controllers.read().await.len();
        let client_locations = self.client_locations.read().await.len();
        StoreStats {
            controllers,
            client_locations,
        }
    }
}
