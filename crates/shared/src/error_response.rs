//! # エラーレスポンス
//!
//! 失敗エンベロープと HTTP ステータスの組を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（axum の `IntoResponse` 変換はサーバー側の責務）
//! - エラー種別ごとにステータスコードとデフォルトメッセージを固定する
//! - 任意引数（上書きメッセージ、詳細情報）は [`ErrorOptions`] にまとめる

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ApiResponse;

/// エラー種別
///
/// 各種別は固定の HTTP ステータスとデフォルトメッセージを持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    Internal,
}

impl ErrorKind {
    /// HTTP ステータスコード
    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Validation => 422,
            Self::Internal => 500,
        }
    }

    /// 上書きメッセージが無い場合に使うメッセージ
    pub fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource conflict",
            Self::Validation => "Validation failed",
            Self::Internal => "Internal server error",
        }
    }
}

/// エラーレスポンスの任意パラメータ
///
/// ```
/// use tomato_clock_shared::{ErrorOptions, ErrorResponse};
///
/// let error = ErrorResponse::not_found(ErrorOptions::message("Task not found"));
/// assert_eq!(error.body.error.as_deref(), Some("Task not found"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorOptions {
    /// デフォルトメッセージの上書き
    pub message: Option<String>,
    /// 構造化された詳細情報
    pub details: Option<Map<String, Value>>,
}

impl ErrorOptions {
    /// 上書きメッセージのみを指定する
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            details: None,
        }
    }

    /// 詳細情報を追加する
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }
}

/// HTTP ステータス付きの失敗エンベロープ
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: u16,
    pub body:   ApiResponse<()>,
}

impl ErrorResponse {
    /// 任意のステータスとメッセージで作成する
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiResponse::failure(error),
        }
    }

    /// エラー種別とオプションから作成する
    pub fn from_kind(kind: ErrorKind, options: ErrorOptions) -> Self {
        let ErrorOptions { message, details } = options;
        let message = message.unwrap_or_else(|| kind.default_message().to_string());
        let body = match details {
            Some(details) => ApiResponse::failure(message).with_details(details),
            None => ApiResponse::failure(message),
        };

        Self {
            status: kind.status(),
            body,
        }
    }

    /// 400 Bad Request
    pub fn bad_request(options: ErrorOptions) -> Self {
        Self::from_kind(ErrorKind::BadRequest, options)
    }

    /// 401 Unauthorized
    pub fn unauthorized(options: ErrorOptions) -> Self {
        Self::from_kind(ErrorKind::Unauthorized, options)
    }

    /// 403 Forbidden
    pub fn forbidden(options: ErrorOptions) -> Self {
        Self::from_kind(ErrorKind::Forbidden, options)
    }

    /// 404 Not Found
    pub fn not_found(options: ErrorOptions) -> Self {
        Self::from_kind(ErrorKind::NotFound, options)
    }

    /// 409 Conflict
    pub fn conflict(options: ErrorOptions) -> Self {
        Self::from_kind(ErrorKind::Conflict, options)
    }

    /// 422 Unprocessable Entity
    pub fn validation_error(options: ErrorOptions) -> Self {
        Self::from_kind(ErrorKind::Validation, options)
    }

    /// 500 Internal Server Error
    pub fn internal_error(options: ErrorOptions) -> Self {
        Self::from_kind(ErrorKind::Internal, options)
    }
}

/// 機械可読なコードを持つ構造化エラー
///
/// 現在のハンドラでは使用していない。将来、エラーコードを
/// クライアントに返す API のために定義している。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code:    String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code:    code.into(),
            message: message.into(),
            details: None,
        }
    }
}
