//! # API エラー定義
//!
//! ハンドラが返すエラー型と、失敗エンベロープへの変換を定義する。
//!
//! ## エラーの流れ
//!
//! ```text
//! AppError
//!    ↓ IntoResponse
//! ErrorResponse（ステータス + 失敗エンベロープ）
//!    ↓ response::error
//! HTTP レスポンス（StatusCode + JSON）
//! ```

use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use thiserror::Error;
use tomato_clock_shared::{ErrorKind, ErrorOptions, ErrorResponse};

use crate::response;

/// ハンドラで発生するエラー
///
/// `IntoResponse` を実装しているため、ハンドラは `Result<_, AppError>` を返せる。
#[derive(Debug, Error)]
pub enum AppError {
    /// 不正なリクエスト（400）
    #[error("不正なリクエスト: {0:?}")]
    BadRequest(Option<String>),

    /// 未認証（401）
    #[error("認証エラー")]
    Unauthorized,

    /// 権限不足（403）
    #[error("権限エラー")]
    Forbidden,

    /// リソースが見つからない（404）
    #[error("リソースが見つかりません")]
    NotFound,

    /// 許可されていない HTTP メソッド（405）
    #[error("許可されていないメソッドです")]
    MethodNotAllowed,

    /// リクエスト処理のタイムアウト（408）
    #[error("リクエストがタイムアウトしました")]
    Timeout,

    /// 競合（409）
    #[error("競合: {0:?}")]
    Conflict(Option<String>),

    /// バリデーションエラー（422）
    #[error("バリデーションエラー: {message}")]
    Validation {
        message: String,
        details: Map<String, Value>,
    },

    /// 内部エラー（500）
    ///
    /// 詳細はログにのみ出力し、クライアントには固定メッセージを返す。
    #[error("内部エラー: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn into_error_response(self) -> ErrorResponse {
        match self {
            AppError::BadRequest(message) => ErrorResponse::from_kind(
                ErrorKind::BadRequest,
                ErrorOptions {
                    message,
                    details: None,
                },
            ),
            AppError::Unauthorized => ErrorResponse::unauthorized(ErrorOptions::default()),
            AppError::Forbidden => ErrorResponse::forbidden(ErrorOptions::default()),
            AppError::NotFound => ErrorResponse::not_found(ErrorOptions::default()),
            AppError::MethodNotAllowed => ErrorResponse::new(405, "Method not allowed"),
            AppError::Timeout => ErrorResponse::new(408, "Request timeout"),
            AppError::Conflict(message) => ErrorResponse::from_kind(
                ErrorKind::Conflict,
                ErrorOptions {
                    message,
                    details: None,
                },
            ),
            AppError::Validation { message, details } => {
                ErrorResponse::validation_error(ErrorOptions::message(message).with_details(details))
            }
            AppError::Internal(e) => {
                tracing::error!("内部エラー: {:?}", e);
                ErrorResponse::internal_error(ErrorOptions::default())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error(self.into_error_response())
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(AppError::BadRequest(None), StatusCode::BAD_REQUEST, "Bad request")]
    #[case(AppError::Unauthorized, StatusCode::UNAUTHORIZED, "Unauthorized")]
    #[case(AppError::Forbidden, StatusCode::FORBIDDEN, "Forbidden")]
    #[case(AppError::NotFound, StatusCode::NOT_FOUND, "Resource not found")]
    #[case(AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")]
    #[case(AppError::Timeout, StatusCode::REQUEST_TIMEOUT, "Request timeout")]
    #[case(AppError::Conflict(Some("Timer already running".to_string())), StatusCode::CONFLICT, "Timer already running")]
    #[case(
        AppError::Internal(anyhow::anyhow!("connection refused")),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error"
    )]
    #[tokio::test]
    async fn test_エラーがステータスと失敗エンベロープに変換される(
        #[case] error: AppError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let response = error.into_response();
        assert_eq!(response.status(), status);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], message);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_validationは詳細情報を含む() {
        let mut details = Map::new();
        details.insert("title".to_string(), json!("required"));

        let response = AppError::Validation {
            message: "Invalid task".to_string(),
            details,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["details"], json!({"title": "required"}));
    }

    #[test]
    fn test_内部エラーの詳細はクライアントに返さない() {
        let error = AppError::Internal(anyhow::anyhow!("password=secret"));

        let response = error.into_error_response();

        assert_eq!(response.body.error.as_deref(), Some("Internal server error"));
    }
}
