//! # ヘルスチェックハンドラ
//!
//! - `/live` — Liveness Check（応答できれば `"alive"`。エンベロープを介さない）
//! - `/ready` — Readiness Check（依存サービスのチェック結果を含む）
//! - `/health` — Health Check（サービス名・バージョン・稼働時間を含む）
//!
//! いずれも状態を持たず、現在時刻と起動時刻から毎回計算する。
//!
//! レスポンス型は [`tomato_clock_shared::health`] を参照。

use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State, response::Response};
use tomato_clock_shared::{
    CheckStatus,
    HealthResponse,
    LivenessResponse,
    ProcessClock,
    ReadinessResponse,
    format_uptime,
    timestamp,
};

use crate::response;

/// ヘルスチェック用の State
pub struct HealthState {
    pub clock: ProcessClock,
}

impl HealthState {
    pub fn new(clock: ProcessClock) -> Self {
        Self { clock }
    }
}

/// Health Check エンドポイント
///
/// 稼働時間は `main` で記録した起動時刻からの経過時間。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Response {
    let data = HealthResponse::healthy(
        timestamp::now_rfc3339(),
        env!("CARGO_PKG_VERSION"),
        format_uptime(state.clock.uptime()),
    );

    response::success(data, Some("Service is healthy"))
}

/// Readiness Check エンドポイント
///
/// FIXME: データベース・Redis への接続確認は未実装で、常に `ok` を返す。
///        接続プールを State に持たせた時点で実際の疎通確認に置き換える。
pub async fn readiness_check() -> Response {
    let data = ReadinessResponse::from_checks(timestamp::now_rfc3339(), dependency_checks());

    response::success(data, Some("Service is ready"))
}

/// 依存サービスごとのチェック結果
fn dependency_checks() -> BTreeMap<String, CheckStatus> {
    BTreeMap::from([
        ("database".to_string(), CheckStatus::Ok),
        ("redis".to_string(), CheckStatus::Ok),
    ])
}

/// Liveness Check エンドポイント
///
/// 依存サービスは確認しない。プロセスが応答できることのみを示す。
pub async fn liveness_check() -> Json<LivenessResponse> {
    Json(LivenessResponse::alive(timestamp::now_rfc3339()))
}
