//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// 共通層のエラー
#[derive(Debug, Error)]
pub enum CommonError {
    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for CommonError {
    fn from(err: ::config::ConfigError) -> Self {
        CommonError::Config(err.to_string())
    }
}

/// レジストリのエラー型
#[derive(Debug, Error)]
pub enum RegistryError {
    /// 共通層のエラー
    #[error(transparent)]
    Common(#[from] CommonError),

    /// 必須フィールドが空などの不正な引数
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// コントローラーが存在しない（読み取り）
    #[error("controller not found: {0}")]
    ControllerNotFound(String),

    /// クライアント所在が存在しない（読み取り）
    #[error("client location not found: {0}")]
    ClientLocationNotFound(String),

    /// ストア層での参照整合性違反
    #[error("cannot assign client {client_id}: controller not found: {controller_id}")]
    ReferentialIntegrity {
        /// 書き込もうとしたクライアントID
        client_id: String,
        /// 存在しなかったコントローラーID
        controller_id: String,
    },

    /// サービス層で検出した未登録コントローラーへの割り当て
    #[error("controller not found: {0}")]
    UnregisteredController(String),

    /// 実行コンテキストがキャンセルされた
    #[error("context canceled")]
    Cancelled,

    /// 実行コンテキストの期限切れ
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl RegistryError {
    /// レコード不在を表すエラーか
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ControllerNotFound(_) | Self::ClientLocationNotFound(_)
        )
    }

    /// 未登録コントローラーへの割り当てを表すエラーか
    pub fn is_unregistered_controller(&self) -> bool {
        matches!(
            self,
            Self::ReferentialIntegrity { .. } | Self::UnregisteredController(_)
        )
    }

    /// 実行コンテキスト由来のエラーか
    pub fn is_context_error(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// 外部クライアント向けの安全なエラーメッセージ
    ///
    /// 内部の識別子を含まない。詳細は `Display` でサーバーログにのみ出力する。
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(_) => "Invalid request",
            Self::InvalidArgument(_) => "Invalid argument",
            Self::ControllerNotFound(_) => "Controller not found",
            Self::ClientLocationNotFound(_) => "Client location not found",
            Self::ReferentialIntegrity { .. } => "Controller not found",
            Self::UnregisteredController(_) => "Controller not found",
            Self::Cancelled => "Request cancelled",
            Self::DeadlineExceeded => "Request timeout",
        }
    }
}

/// レジストリ操作の結果型
pub type RegistryResult<T> = Result<T, RegistryError>;
