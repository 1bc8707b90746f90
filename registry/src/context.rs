//! リクエスト実行コンテキスト
//!
//! キャンセルと期限を持つコンテキスト。ストア操作は変更を確定する前に
//! `check()` を呼び、キャンセル済み・期限切れなら中断する。

use std::time::Duration;

use controller_registry_common::error::{RegistryError, RegistryResult};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// リクエスト実行コンテキスト
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// キャンセルされず期限も持たないコンテキスト
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// 親トークンのキャンセルに追従するコンテキスト
    ///
    /// サーバー停止時にルートトークンをキャンセルすると、実行中の全リクエストに伝播する。
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            deadline: None,
        }
    }

    /// 現在時刻から `timeout` 後を期限とする
    ///
    /// 既存の期限の方が早い場合はそちらを維持する。
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// 期限を設定する
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// このコンテキストから派生した子コンテキスト（期限を引き継ぐ）
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// コンテキストをキャンセルする
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// 期限までの残り時間
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// 処理を続行してよいか確認する
    ///
    /// キャンセルは期限切れより優先して報告する。
    pub fn check(&self) -> RegistryResult<()> {
        if self.token.is_cancelled() {
            return Err(RegistryError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(RegistryError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
