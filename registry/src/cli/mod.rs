//! CLI module for controller-registry
//!
//! コマンドライン引数と設定の解決

use std::path::PathBuf;

use clap::Parser;
use controller_registry_common::config::RegistryConfig;
use controller_registry_common::error::CommonError;

/// Controller registry - maps controllers and the clients attached to them
#[derive(Parser, Debug)]
#[command(name = "controller-registry")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    REGISTRY_CONFIG               Config file path (TOML)
    REGISTRY_HOST                 Bind address (default: 0.0.0.0)
    REGISTRY_PORT                 Listen port (default: 9090)
    REGISTRY_LOG_LEVEL            Log level (default: info, RUST_LOG takes precedence)
    REGISTRY_REQUEST_TIMEOUT_MS   Per-request timeout in milliseconds (default: 5000)
"#)]
pub struct Cli {
    /// Config file path (TOML)
    #[arg(short, long, env = "REGISTRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long, visible_alias = "grpc-port")]
    pub port: Option<u16>,

    /// Log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub request_timeout_ms: Option<u64>,
}

impl Cli {
    /// 設定ファイル・環境変数を読み込み、コマンドライン引数で上書きする
    pub fn resolve_config(&self) -> Result<RegistryConfig, CommonError> {
        let mut config = RegistryConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// 指定された引数のみ設定に反映する
    pub fn apply_overrides(&self, config: &mut RegistryConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(timeout) = self.request_timeout_ms {
            config.request_timeout_ms = timeout;
        }
    }
}
