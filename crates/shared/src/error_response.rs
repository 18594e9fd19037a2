//! # エラーレスポンス
//!
//! 全サービスで共通のエラーボディ `{ "error": "..." }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - ステータスコードとの組み合わせは各サービスのエラー型の責務
//! - 5xx のメッセージは固定値（内部情報を漏らさないため）

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// リソース・メソッドの組み合わせが不正（400）
    pub fn invalid_request() -> Self {
        Self::new("Invalid request")
    }

    /// 許可されていないメソッド（405）
    pub fn method_not_allowed() -> Self {
        Self::new("Method not allowed")
    }

    /// ボディが JSON として読めない（400）
    pub fn invalid_json() -> Self {
        Self::new("Invalid JSON body")
    }

    /// 500 Internal Server Error
    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_jsonシリアライズでerrorフィールドのみを持つ() {
        let json = serde_json::to_value(ErrorResponse::invalid_request()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid request" }));
    }

    #[test]
    fn test_全便利コンストラクタのメッセージ() {
        assert_eq!(ErrorResponse::method_not_allowed().error, "Method not allowed");
        assert_eq!(ErrorResponse::invalid_json().error, "Invalid JSON body");
        assert_eq!(ErrorResponse::internal_error().error, "Internal server error");
    }
}
