//! # Department Service エラー定義
//!
//! 部署 API 固有のエラーと、ゲートウェイレスポンスへの変換を定義する。
//!
//! | エラー | ステータス |
//! |--------|-----------|
//! | リソース・メソッドの組み合わせ不正、PUT の id 欠落 | 400 `Invalid request` |
//! | `group_id` クエリが整数でない | 400 |
//! | 必須フィールド欠落・型不一致 | 400 |
//! | ボディが JSON でない、DB エラー | 500 |

use staffdesk_domain::DomainError;
use staffdesk_infra::InfraError;
use staffdesk_shared::{ErrorResponse, GatewayResponse};
use thiserror::Error;

/// Department Service で発生するエラー
#[derive(Debug, Error)]
pub enum DepartmentError {
    /// 対応していないリソース・メソッドの組み合わせ
    #[error("Invalid request")]
    InvalidRequest,

    /// `group_id` クエリが整数として読めない
    #[error("Invalid group_id: {0}")]
    InvalidGroupId(String),

    /// 入力スキーマ違反
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// ボディが JSON として読めない
    #[error("リクエストボディが JSON ではありません: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DepartmentError> for GatewayResponse {
    fn from(error: DepartmentError) -> Self {
        match &error {
            DepartmentError::InvalidRequest => {
                GatewayResponse::error(400, &ErrorResponse::invalid_request())
            }
            DepartmentError::InvalidGroupId(_) | DepartmentError::Validation(_) => {
                GatewayResponse::error(400, &ErrorResponse::new(error.to_string()))
            }
            DepartmentError::MalformedBody(e) => {
                tracing::error!(error = %e, "リクエストボディの解析に失敗");
                GatewayResponse::error(500, &ErrorResponse::internal_error())
            }
            DepartmentError::Database(e) => {
                tracing::error!(
                    error = %e,
                    constraint = e.violated_constraint(),
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                GatewayResponse::error(500, &ErrorResponse::internal_error())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_invalid_requestは400() {
        let response = GatewayResponse::from(DepartmentError::InvalidRequest);

        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"Invalid request"}"#);
    }

    #[test]
    fn test_バリデーションエラーはメッセージ付きの400() {
        let response = GatewayResponse::from(DepartmentError::Validation(DomainError::validation(
            "missing field `title`",
        )));

        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"missing field `title`"}"#);
    }

    #[test]
    fn test_dbエラーは詳細を隠した500() {
        let response =
            GatewayResponse::from(DepartmentError::Database(InfraError::unexpected("接続断")));

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error":"Internal server error"}"#);
    }
}
