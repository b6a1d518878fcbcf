//! # Tomato Clock API サーバー
//!
//! ポモドーロタイマーのバックエンド API サーバー。
//!
//! ## 役割
//!
//! - **プローブ**: Liveness / Readiness / Health Check を提供
//! - **レスポンス形式の統一**: すべての API 応答を共通エンベロープで返す
//!
//! ## 環境変数
//!
//! 未設定・空文字・不正な値はデフォルト値にフォールバックする（起動は失敗しない）。
//! 全項目の一覧は [`tomato_clock_server::config`] を参照。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `PORT` | `8080` | 待ち受けポート |
//! | `GIN_MODE` | `debug` | 実行モード（`debug` / `release` / `test`） |
//! | `HOST` | `localhost` | 起動ログに表示するホスト名 |
//! | `BASE_PATH` | `/api/v1` | API グループのベースパス |
//! | `LOG_LEVEL` | `debug` | ログレベル（`RUST_LOG` 設定時はそちらを優先） |
//! | `LOG_FORMAT` | `text` | ログ形式（`text` / `json`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p tomato-clock-server
//!
//! # 本番環境（環境変数を直接指定）
//! PORT=3000 GIN_MODE=release LOG_FORMAT=json cargo run -p tomato-clock-server --release
//! ```

use std::net::SocketAddr;

use anyhow::Context as _;
use tokio::net::TcpListener;
use tomato_clock_server::{
    app_builder::{ServerTimeouts, build_app},
    config::AppConfig,
};
use tomato_clock_shared::{
    ProcessClock,
    health::SERVICE_NAME,
    observability::{TracingConfig, init_tracing},
};

/// サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. アプリケーション設定の読み込み
/// 3. トレーシングの初期化
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    let dotenv_result = dotenvy::dotenv();

    // ログ設定も環境変数から読むため、設定読み込みを先に行う
    let config = AppConfig::load();

    let tracing_config = TracingConfig::new(
        SERVICE_NAME,
        config.log.level.clone(),
        config.log.format,
        config.log.output,
    );
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = %tracing_config.service_name).entered();

    if let Err(e) = dotenv_result {
        tracing::warn!(".env ファイルを読み込めませんでした（環境変数のみを使用します）: {}", e);
    }
    for warning in config.warnings() {
        tracing::warn!("設定値が不正です: {}", warning);
    }

    let clock = ProcessClock::start();
    let app = build_app(&config, clock);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("ポートのバインドに失敗しました: {}: {}", addr, e);
            return Err(e).with_context(|| format!("{addr} にバインドできません"));
        }
    };

    let timeouts = ServerTimeouts::DEFAULT;
    tracing::info!(
        port = config.server.port,
        mode = %config.server.mode,
        read_timeout = ?timeouts.read,
        write_timeout = ?timeouts.write,
        "サーバーが起動しました"
    );
    tracing::info!(
        "Health check: http://{}:{}/health",
        config.server.host,
        config.server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("サーバーの実行中にエラーが発生しました")?;

    tracing::info!("サーバーを停止しました");
    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl-C ハンドラの登録に失敗しました: {}", e);
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
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
