//! 通信プロトコル定義
//!
//! コントローラー↔レジストリ間のリモート呼び出しメッセージ。
//! 必須フィールドが欠けたリクエストは空文字列としてデシリアライズされ、
//! トランスポート層で `InvalidArgument` として拒否される。

use serde::{Deserialize, Serialize};

/// 業務エラーを表すステータス文字列の接頭辞
pub const FAILED_PREFIX: &str = "failed: ";

/// コントローラー登録成功時のステータス
pub const CONTROLLER_REGISTERED: &str = "controller registered successfully";

/// クライアント所在設定成功時のステータス
pub const CLIENT_LOCATION_SET: &str = "client location set successfully";

/// リフレッシュ要求受理時のステータス
pub const REFRESH_REQUESTED: &str = "refresh request sent";

/// コントローラー未登録時のエラー文字列
pub const CONTROLLER_NOT_FOUND: &str = "controller not found";

/// 業務エラーをステータス文字列に変換する
pub fn failure_status(reason: impl std::fmt::Display) -> String {
    format!("{FAILED_PREFIX}{reason}")
}

/// ステータス文字列が業務エラーを表すか判定する
pub fn is_failure_status(status: &str) -> bool {
    status.starts_with(FAILED_PREFIX)
}

/// コントローラー登録リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterControllerRequest {
    /// コントローラーID
    #[serde(default)]
    pub controller_id: String,
    /// コントローラーのRPCアドレス
    #[serde(default)]
    pub grpc_address: String,
}

/// ステータス文字列のみを返すレスポンス
///
/// 業務エラー時も `"failed: "` で始まる文字列として返す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// ステータスメッセージ
    pub success: String,
}

impl StatusResponse {
    /// 成功ステータスを作成
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: message.into(),
        }
    }

    /// 失敗ステータスを作成
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            success: failure_status(reason),
        }
    }

    /// 失敗ステータスか判定
    pub fn is_failure(&self) -> bool {
        is_failure_status(&self.success)
    }
}

/// クライアント所在照会リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientLocationRequest {
    /// クライアントID
    #[serde(default)]
    pub client_id: String,
}

/// クライアント所在照会レスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientLocationResponse {
    /// 所在が見つかったか
    pub found: bool,
    /// 所属コントローラーID（見つからない場合は空）
    #[serde(default)]
    pub controller_id: String,
    /// 所属コントローラーのアドレス（見つからない場合は空）
    #[serde(default)]
    pub controller_fqdn: String,
}

impl ClientLocationResponse {
    /// 見つからなかった場合のレスポンス
    pub fn not_found() -> Self {
        Self::default()
    }
}

/// クライアント所在設定リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetClientLocationRequest {
    /// クライアントID
    #[serde(default)]
    pub client_id: String,
    /// 割り当て先コントローラーID
    #[serde(default)]
    pub controller_id: String,
}

/// コントローラー登録確認リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IsControllerRegisteredRequest {
    /// コントローラーID
    #[serde(default)]
    pub controller_id: String,
}

/// コントローラー登録確認レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IsControllerRegisteredResponse {
    /// 登録済みか
    pub registered: bool,
}

/// クライアント所在一括設定リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkSetClientLocationsRequest {
    /// 割り当て先コントローラーID
    #[serde(default)]
    pub controller_id: String,
    /// 割り当てるクライアントID一覧
    #[serde(default)]
    pub client_ids: Vec<String>,
}

/// クライアント所在一括設定レスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkSetClientLocationsResponse {
    /// バッチが受理されたか（コントローラー未登録時のみ false）
    pub success: bool,
    /// エラーメッセージ（成功時は空）
    #[serde(default)]
    pub error: String,
    /// 更新に成功した件数
    pub updated_count: i32,
}

/// クライアントリフレッシュ要求
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientRefreshRequest {
    /// 対象コントローラーID
    #[serde(default)]
    pub controller_id: String,
}

/// クライアントリフレッシュ応答
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientRefreshResponse {
    /// ステータスメッセージ
    pub success: String,
    /// リフレッシュされたクライアント数（常に 0、コントローラーからの応答待ち）
    pub client_count: i32,
}

/// ヘルスチェックレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// 稼働状態 ("ok")
    pub status: String,
    /// サーバーバージョン
    pub version: String,
    /// 登録済みコントローラー数
    pub controllers: usize,
    /// 記録済みクライアント所在数
    pub client_locations: usize,
}
