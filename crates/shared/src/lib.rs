//! # StaffDesk 共有ユーティリティ
//!
//! 3 つのサービス（部署 API / 確認メール送信 / 応募受付）で共通に使う型を提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, apps）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない。HTTP 型との変換は `http` feature で提供する

pub mod error_response;
pub mod gateway;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use gateway::{CorsPolicy, GatewayEvent, GatewayResponse};
pub use health::HealthResponse;
