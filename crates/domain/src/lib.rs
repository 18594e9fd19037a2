//! # StaffDesk ドメイン層
//!
//! 部署管理アプリケーションのドメインモデルと入力スキーマを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: グループ、社員、タスク、応募（[`group`], [`employee`], [`task`], [`application`]）
//! - **入力スキーマ**: リクエストボディを受ける構造体。永続化の前に必ず検証する
//! - **部分更新**: 更新可能なカラムを固定の許可リストとして型で表現する
//! - **ドメインエラー**: 入力検証の失敗を [`DomainError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//!    ↘    ↓
//!     shared
//! ```
//!
//! ドメイン層はインフラ層（DB、SMTP）に依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use staffdesk_domain::{DomainError, employee::NewEmployee};
//!
//! let body = serde_json::json!({ "name": "Иван Петров", "group_id": 1 });
//! let employee: NewEmployee = staffdesk_domain::validation::parse_schema(body)?;
//! assert_eq!(employee.status(), "active");
//! # Ok::<(), DomainError>(())
//! ```

#[macro_use]
mod macros;

pub mod application;
pub mod employee;
pub mod error;
pub mod group;
pub mod notification;
pub mod task;
pub mod update;
pub mod validation;

pub use error::DomainError;
