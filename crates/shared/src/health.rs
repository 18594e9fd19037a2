//! # ヘルスチェック共通型
//!
//! 全サービスのヘルスチェックエンドポイントで使用される共通レスポンス型。

use serde::Serialize;

/// ヘルスチェックレスポンス
///
/// ## 使用例
///
/// ```
/// use staffdesk_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            version: version.into(),
        }
    }
}
