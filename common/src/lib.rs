//! Controller Registry 共通ライブラリ
//!
//! レジストリサーバーとクライアントで共有するデータ型・通信メッセージ・エラー・設定

#![warn(missing_docs)]

/// 設定管理
pub mod config;

/// エラー型定義
pub mod error;

/// 通信プロトコル定義
pub mod protocol;

/// コアデータ型
pub mod types;
