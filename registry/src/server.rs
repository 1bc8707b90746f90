//! axumサーバー起動・シャットダウンハンドリング

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::AppState;

/// サーバーを起動し、シャットダウンシグナルを待機する
pub async fn run(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    let shutdown = state.shutdown.clone();
    let app = crate::api::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    info!("Controller registry listening on {}", listener.local_addr()?);

    serve(listener, app, shutdown).await
}

/// バインド済みのリスナーでルーターを提供する
///
/// シグナル受信または `shutdown` のキャンセルで停止し、
/// 停止時には `shutdown` をキャンセルして実行中のリクエストへ伝播させる。
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.cancelled() => {
            info!("Shutdown requested, shutting down...");
        }
    }

    shutdown.cancel();
}
