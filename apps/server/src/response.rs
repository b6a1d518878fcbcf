//! # レスポンス書き出し
//!
//! 共有クレートのエンベロープ型を axum の [`Response`] に変換する。
//!
//! 各関数はステータスコードと JSON ボディを確定させた `Response` を返し、
//! ハンドラはそれをそのまま返す（呼び出し側で加工しない）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tomato_clock_shared::{ApiResponse, ErrorOptions, ErrorResponse, PaginatedResponse};

/// 200 OK + 成功エンベロープ
pub fn success<T: Serialize>(data: T, message: Option<&str>) -> Response {
    let body = ApiResponse::success(data, message.map(str::to_string));
    (StatusCode::OK, Json(body)).into_response()
}

/// 201 Created + 成功エンベロープ
///
/// メッセージ省略時は `"Resource created successfully"` になる。
pub fn created<T: Serialize>(data: T, message: Option<&str>) -> Response {
    let body = ApiResponse::created(data, message.map(str::to_string));
    (StatusCode::CREATED, Json(body)).into_response()
}

/// 200 OK + ページネーション付き成功エンベロープ
///
/// ページネーション情報は `data` の内側に入れ子で配置される。
pub fn paginated<T: Serialize>(data: T, page: u64, page_size: u64, total: u64) -> Response {
    success(PaginatedResponse::new(data, page, page_size, total), None)
}

/// 失敗エンベロープ
///
/// ステータスコードが不正な値の場合は 500 として返す。
pub fn error(error: ErrorResponse) -> Response {
    let status =
        StatusCode::from_u16(error.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(error.body)).into_response()
}

/// 400 Bad Request
pub fn bad_request(options: ErrorOptions) -> Response {
    error(ErrorResponse::bad_request(options))
}

/// 401 Unauthorized
pub fn unauthorized(options: ErrorOptions) -> Response {
    error(ErrorResponse::unauthorized(options))
}

/// 403 Forbidden
pub fn forbidden(options: ErrorOptions) -> Response {
    error(ErrorResponse::forbidden(options))
}

/// 404 Not Found
pub fn not_found(options: ErrorOptions) -> Response {
    error(ErrorResponse::not_found(options))
}

/// 409 Conflict
pub fn conflict(options: ErrorOptions) -> Response {
    error(ErrorResponse::conflict(options))
}

/// 422 Unprocessable Entity
pub fn validation_error(options: ErrorOptions) -> Response {
    error(ErrorResponse::validation_error(options))
}

/// 500 Internal Server Error
pub fn internal_error(options: ErrorOptions) -> Response {
    error(ErrorResponse::internal_error(options))
}
