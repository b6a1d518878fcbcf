//! # Tomato Clock サーバーライブラリ
//!
//! ポモドーロタイマーのバックエンド API サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築とミドルウェア
//! - `config`: 環境変数からの設定読み込み
//! - `error`: ハンドラのエラー型
//! - `handler`: HTTP ハンドラ
//! - `response`: レスポンス書き出し

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod response;
