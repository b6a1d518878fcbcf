//! # API レスポンスエンベロープ
//!
//! すべてのハンドラが返す統一レスポンス形式を提供する。
//!
//! ## JSON 形式
//!
//! 成功時:
//!
//! ```json
//! {
//!   "success": true,
//!   "data": { ... },
//!   "message": "Service is healthy",
//!   "timestamp": "2024-05-01T09:30:00Z"
//! }
//! ```
//!
//! 失敗時:
//!
//! ```json
//! {
//!   "success": false,
//!   "error": "Resource not found",
//!   "timestamp": "2024-05-01T09:30:00Z"
//! }
//! ```
//!
//! 値を持たないフィールドは出力しない。成功時に `error` / `details` が、
//! 失敗時に `data` / `message` が含まれることはない。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timestamp;

/// 201 レスポンスでメッセージ省略時に使うデフォルトメッセージ
pub const DEFAULT_CREATED_MESSAGE: &str = "Resource created successfully";

/// 統一レスポンス型
///
/// 成功・失敗の排他性はコンストラクタ（`success` / `created` / `failure`）が保証する。
/// フィールドは公開されているため、直接組み立てる場合や `Deserialize` で
/// 読み込んだ値については保証されない。
///
/// ## 使用例
///
/// ```
/// use tomato_clock_shared::ApiResponse;
///
/// let response = ApiResponse::success("hello", Some("ok".to_string()));
/// assert!(response.success);
/// assert_eq!(response.data, Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success:   bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data:      Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message:   Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:     Option<String>,
    /// 失敗時の構造化された詳細情報（バリデーションエラーのフィールド別内容など）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details:   Option<Map<String, Value>>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// 成功レスポンスを作成する
    pub fn success(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
            error: None,
            details: None,
            timestamp: timestamp::now_rfc3339(),
        }
    }

    /// 作成成功レスポンスを作成する
    ///
    /// メッセージ省略時は [`DEFAULT_CREATED_MESSAGE`] を設定する。
    pub fn created(data: T, message: Option<String>) -> Self {
        Self::success(
            data,
            Some(message.unwrap_or_else(|| DEFAULT_CREATED_MESSAGE.to_string())),
        )
    }
}

impl ApiResponse<()> {
    /// 失敗レスポンスを作成する
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success:   false,
            data:      None,
            message:   None,
            error:     Some(error.into()),
            details:   None,
            timestamp: timestamp::now_rfc3339(),
        }
    }

    /// 失敗レスポンスに詳細情報を付与する
    ///
    /// 空のマップは付与しない。
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        if !details.is_empty() {
            self.details = Some(details);
        }
        self
    }
}
