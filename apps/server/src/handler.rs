//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - レスポンスは [`crate::response`] の関数で組み立てる
//!
//! ## ハンドラ一覧
//!
//! - `health`: Liveness / Readiness / Health Check

pub mod health;

pub use health::{HealthState, health_check, liveness_check, readiness_check};
