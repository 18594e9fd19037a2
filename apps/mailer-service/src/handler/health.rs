use axum::Json;
use staffdesk_shared::HealthResponse;

/// 確認メール送信 API のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
