//! テスト用ヘルパー

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use controller_registry::service::RegistryService;
use controller_registry::store::InMemoryRecordStore;
use controller_registry::{api, server, AppState};
use serde_json::Value;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// テスト用のアプリケーション状態を作成する
pub fn create_test_state() -> AppState {
    AppState::new(
        RegistryService::new(Arc::new(InMemoryRecordStore::new())),
        Duration::from_secs(5),
    )
}

/// テスト用のルーターを作成する（.oneshot()スタイルのテスト用）
pub fn create_test_app() -> (Router, AppState) {
    let state = create_test_state();
    (api::create_router(state.clone()), state)
}

/// JSONをPOSTし、ステータスとJSON本文を返す
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// GETし、ステータスとJSON本文を返す
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// 実ポートで起動したテストサーバー
pub struct TestServer {
    addr: SocketAddr,
    state: AppState,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    /// RPCエンドポイントのURL
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// サーバーを停止し、終了を待つ
    pub async fn shutdown(self) {
        self.state.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not shut down")
            .expect("server task panicked")
            .expect("server returned error");
    }
}

/// エフェメラルポートでレジストリサーバーを起動する
pub async fn spawn_test_server() -> TestServer {
    let state = create_test_state();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = api::create_router(state.clone());
    let handle = tokio::spawn(server::serve(listener, app, state.shutdown.clone()));

    TestServer {
        addr,
        state,
        handle,
    }
}
