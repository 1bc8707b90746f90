//! レコードストア
//!
//! コントローラーとクライアント所在の2つのコレクションを保持する。
//! ロックはすべてストアが所有し、呼び出し側には値のコピーのみを渡す。

pub mod memory;

pub use memory::InMemoryRecordStore;

use std::time::Duration;

use async_trait::async_trait;
use controller_registry_common::error::RegistryResult;
use controller_registry_common::types::{ClientLocationRecord, ControllerRecord};
use serde::Serialize;

use crate::context::RequestContext;

/// ストアのレコード件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// コントローラー数
    pub controllers: usize,
    /// クライアント所在数
    pub client_locations: usize,
}

/// レコードストアのtrait
///
/// すべての操作は `ctx` を受け取り、変更を確定する前にキャンセル・期限を確認する。
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// コントローラーを保存（同じIDは上書き）
    async fn put_controller(
        &self,
        ctx: &RequestContext,
        record: ControllerRecord,
    ) -> RegistryResult<()>;

    /// コントローラーを取得
    async fn get_controller(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
    ) -> RegistryResult<ControllerRecord>;

    /// クライアント所在を保存（参照先コントローラーが存在しなければ失敗）
    async fn put_client_location(
        &self,
        ctx: &RequestContext,
        record: ClientLocationRecord,
    ) -> RegistryResult<()>;

    /// クライアント所在を取得
    async fn get_client_location(
        &self,
        ctx: &RequestContext,
        client_id: &str,
    ) -> RegistryResult<ClientLocationRecord>;

    /// レコード件数
    async fn stats(&self) -> StoreStats;

    /// 期限を絞ってコントローラーを取得
    async fn get_controller_with_timeout(
        &self,
        ctx: &RequestContext,
        controller_id: &str,
        timeout: Duration,
    ) -> RegistryResult<ControllerRecord> {
        let ctx = ctx.child().with_timeout(timeout);
        self.get_controller(&ctx, controller_id).await
    }
}
