//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定・トレーシングの初期化とサーバー起動に集中する。

use std::{sync::Arc, time::Duration};

use axum::{BoxError, Router, error_handling::HandleErrorLayer, routing::get};
use tomato_clock_shared::{
    ProcessClock,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower::{ServiceBuilder, timeout::error::Elapsed};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::RequestBodyTimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::AppConfig,
    error::AppError,
    handler::{HealthState, health_check, liveness_check, readiness_check},
};

/// サーバーのタイムアウト設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerTimeouts {
    /// リクエストボディの受信
    pub read:  Duration,
    /// ハンドラの処理からレスポンス生成まで
    pub write: Duration,
    /// Keep-Alive 接続の待機
    ///
    /// `axum::serve` は接続単位のアイドルタイムアウトを公開していないため未適用。
    pub idle:  Duration,
}

impl ServerTimeouts {
    pub const DEFAULT: Self = Self {
        read:  Duration::from_secs(10),
        write: Duration::from_secs(10),
        idle:  Duration::from_secs(120),
    };
}

impl Default for ServerTimeouts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// ルーターを構築する
///
/// ルート構成:
///
/// - `/health`, `/ready`, `/live`: ルート直下のプローブ
/// - `{base_path}/health`: API グループ配下の Health Check
/// - 上記以外: 404 の失敗エンベロープ
pub fn build_app(config: &AppConfig, clock: ProcessClock) -> Router {
    let health_state = Arc::new(HealthState::new(clock));

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check));

    match normalize_base_path(&config.server.base_path) {
        Some(base_path) => {
            let api = Router::new().route("/health", get(health_check));
            router = router.nest(&base_path, api);
        }
        None => {
            tracing::warn!(
                "BASE_PATH をルートとして使用できないため、API グループを登録しません: {:?}",
                config.server.base_path
            );
        }
    }

    let router = router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(health_state);

    with_layers(router, ServerTimeouts::DEFAULT)
}

/// 全ルート共通のミドルウェアを適用する
fn with_layers(router: Router, timeouts: ServerTimeouts) -> Router {
    // レイヤーは下から上の順に適用される（最後に追加したものが最外）
    // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
    // 2. TraceLayer: request_id を含むスパンを作成
    // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
    // 4. 処理タイムアウト: 超過時は 408 の失敗エンベロープ
    // 5. RequestBodyTimeoutLayer: ボディ受信のタイムアウト
    router
        .layer(RequestBodyTimeoutLayer::new(timeouts.read))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(timeouts.write),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// `BASE_PATH` をネスト可能な形に正規化する
///
/// 先頭に `/` を補い、末尾の `/` を取り除く。ルート（`/`）やパスパラメータを
/// 含む値はネストできないため `None` を返す。
fn normalize_base_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.contains(['{', '}', '*', ':']) {
        return None;
    }
    Some(format!("/{trimmed}"))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn handle_timeout_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!("リクエスト処理がタイムアウトしました");
        AppError::Timeout
    } else {
        AppError::Internal(anyhow::anyhow!(err))
    }
}
