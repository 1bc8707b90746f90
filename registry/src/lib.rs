//! Controller Registry Server
//!
//! コントローラーの登録と、クライアントが現在どのコントローラーに
//! 接続しているかを管理するレジストリサーバー

#![warn(missing_docs)]

/// リモート呼び出しAPIハンドラー
pub mod api;

/// コマンドライン引数
pub mod cli;

/// リクエスト実行コンテキスト
pub mod context;

/// ログ初期化
pub mod logging;

/// axumサーバー起動・シャットダウン
pub mod server;

/// 業務ルール層
pub mod service;

/// レコードストア
pub mod store;

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::context::RequestContext;
use crate::service::RegistryService;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// レジストリサービス
    pub service: RegistryService,
    /// リクエスト毎のタイムアウト
    pub request_timeout: Duration,
    /// ルートのシャットダウントークン
    pub shutdown: CancellationToken,
}

impl AppState {
    /// 新しいアプリケーション状態を作成
    pub fn new(service: RegistryService, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    /// リクエスト用のコンテキストを作成
    ///
    /// シャットダウンに追従し、設定されたタイムアウトを期限とする。
    pub fn request_context(&self) -> RequestContext {
        RequestContext::child_of(&self.shutdown).with_timeout(self.request_timeout)
    }
}
