//! # StaffDesk インフラ層
//!
//! 外部システム（PostgreSQL、SMTP リレー）との接続・通信を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: グループ・社員・タスク・応募の読み書き
//! - **メール送信**: 確認メールのレンダリングと SMTP（STARTTLS）での送信
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`notification`] - 確認メールの生成と送信
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use staffdesk_infra::{db, repository::PostgresTaskRepository};
//!
//! let pool = db::create_pool("postgres://localhost/staffdesk").await?;
//! let tasks = PostgresTaskRepository::new(pool);
//! ```

pub mod db;
pub mod error;
pub mod notification;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
