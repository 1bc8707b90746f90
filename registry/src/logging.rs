//! ログ初期化
//!
//! `RUST_LOG` が設定されていればそれを優先し、なければ設定のログレベルを使う。

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// ログレベル文字列からフィルタを作成
pub fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))
}

/// tracingサブスクライバを初期化
pub fn init(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
