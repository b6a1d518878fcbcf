//! # ヘルスチェック共通型
//!
//! Liveness / Readiness / Health の各エンドポイントが返すペイロード型を提供する。
//!
//! Readiness と Health は成功エンベロープの `data` に入れて返し、
//! Liveness はエンベロープを介さずにそのまま返す。
//!
//! 現在の Readiness Check は依存サービスを常に `ok` と報告する。
//! [`CheckStatus::Error`] / [`ReadinessStatus::NotReady`] /
//! [`ReadinessResponse::is_ready`] は、データベース・Redis の疎通確認を
//! 実装した際に失敗を表すための型で、現時点ではサーバーから使われない。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Health レスポンスのサービス名
pub const SERVICE_NAME: &str = "tomato-clock-backend";

/// Health Check レスポンス
///
/// ## 使用例
///
/// ```
/// use tomato_clock_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("2024-05-01T09:30:00Z", "1.0.0", "3.5s");
/// assert_eq!(response.status, "healthy");
/// assert_eq!(response.service, "tomato-clock-backend");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（常に `"healthy"`）
    pub status:    String,
    pub timestamp: String,
    pub service:   String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version:   String,
    /// 起動からの経過時間（[`crate::format_uptime`] の書式）
    pub uptime:    String,
}

impl HealthResponse {
    pub fn healthy(
        timestamp: impl Into<String>,
        version: impl Into<String>,
        uptime: impl Into<String>,
    ) -> Self {
        Self {
            status:    "healthy".to_string(),
            timestamp: timestamp.into(),
            service:   SERVICE_NAME.to_string(),
            version:   version.into(),
            uptime:    uptime.into(),
        }
    }
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// チェック成功
    Ok,
    /// チェック失敗
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全依存サービスが利用可能
    Ready,
    /// 一部の依存サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// `checks` のキーは依存先の名前（`database`, `redis`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status:    ReadinessStatus,
    pub timestamp: String,
    pub checks:    BTreeMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体のステータスを決定する
    ///
    /// すべて `Ok` なら `Ready`、1 つでも `Error` なら `NotReady`。
    pub fn from_checks(
        timestamp: impl Into<String>,
        checks: BTreeMap<String, CheckStatus>,
    ) -> Self {
        let status = if checks.values().all(|s| *s == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };

        Self {
            status,
            timestamp: timestamp.into(),
            checks,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}

/// Liveness Check レスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// 常に `"alive"`
    pub status:    String,
    pub timestamp: String,
}

impl LivenessResponse {
    pub fn alive(timestamp: impl Into<String>) -> Self {
        Self {
            status:    "alive".to_string(),
            timestamp: timestamp.into(),
        }
    }
}
