//! 共通型定義
//!
//! コントローラーとクライアント所在のレコード型

use serde::{Deserialize, Serialize};

/// コントローラーレコード
///
/// コントローラーが登録時に名乗るIDと、自身のRPCエンドポイント。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ControllerRecord {
    /// コントローラーID（一意キー）
    #[serde(rename = "controller_id")]
    pub id: String,
    /// RPCエンドポイントのアドレス (例: "10.0.0.1:9090")
    #[serde(rename = "grpc_address")]
    pub endpoint: String,
}

impl ControllerRecord {
    /// 新しいコントローラーレコードを作成
    pub fn new(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// クライアント所在レコード
///
/// クライアントが現在どのコントローラーに接続しているかを表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientLocationRecord {
    /// クライアントID（一意キー）
    pub client_id: String,
    /// 所属コントローラーID
    pub controller_id: String,
}

impl ClientLocationRecord {
    /// 新しいクライアント所在レコードを作成
    pub fn new(client_id: impl Into<String>, controller_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            controller_id: controller_id.into(),
        }
    }
}
