//! # Tomato Clock 共有ユーティリティ
//!
//! サーバーアプリケーションから利用される、フレームワーク非依存の型を提供する。
//!
//! ## 設計方針
//!
//! - axum への依存を持たない（HTTP レスポンスへの変換はサーバー側の責務）
//! - ビジネスロジックを含まない純粋なデータ構造のみを配置
//! - ログ初期化は `observability` feature 有効時のみコンパイルする

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;
pub mod paginated_response;
pub mod timestamp;
pub mod uptime;

pub use api_response::ApiResponse;
pub use error_response::{ApiError, ErrorKind, ErrorOptions, ErrorResponse};
pub use health::{CheckStatus, HealthResponse, LivenessResponse, ReadinessResponse, ReadinessStatus};
pub use paginated_response::{PaginatedResponse, Pagination};
pub use uptime::{ProcessClock, format_uptime};
