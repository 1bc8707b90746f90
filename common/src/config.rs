//! 設定管理
//!
//! レジストリサーバーの設定構造体。
//! デフォルト値 → TOML設定ファイル → 環境変数 (`REGISTRY_` 接頭辞) の順で上書きされる。

use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// 環境変数の接頭辞
pub const ENV_PREFIX: &str = "REGISTRY";

/// レジストリサーバー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 9090)
    #[serde(default = "default_port")]
    pub port: u16,

    /// ログレベル (デフォルト: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// リクエスト毎のタイムアウト（ミリ秒）(デフォルト: 5000)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl RegistryConfig {
    /// 設定ファイルと環境変数から設定を読み込む
    ///
    /// `path` が指定された場合、そのファイルは存在しなければならない。
    /// 値の検証は行わない。呼び出し側で上書きを適用した後に `validate()` を呼ぶ。
    pub fn load(path: Option<&Path>) -> Result<Self, CommonError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// 値の妥当性を検証
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.host.trim().is_empty() {
            return Err(CommonError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(CommonError::Config("port must be non-zero".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(CommonError::Config(
                "request_timeout_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// バインドアドレス ("host:port")
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// リクエストタイムアウト
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
