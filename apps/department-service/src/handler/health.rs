//! # ヘルスチェックハンドラ
//!
//! レスポンス型は [`staffdesk_shared::HealthResponse`] を参照。

use axum::Json;
use staffdesk_shared::HealthResponse;

/// 部署 API のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
