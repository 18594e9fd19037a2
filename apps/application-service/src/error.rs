//! # Application Service エラー定義
//!
//! | エラー | ステータス |
//! |--------|-----------|
//! | POST / OPTIONS 以外 | 405 |
//! | `application_type` が不正 | 400 |
//! | スキーマ違反 | 422 |
//! | ボディが JSON でない、DB エラー | 500 |
//!
//! 確認メールの失敗はエラーにならない（`email_sent: false` で成功を返す）。

use staffdesk_domain::DomainError;
use staffdesk_infra::InfraError;
use staffdesk_shared::{ErrorResponse, GatewayResponse};
use thiserror::Error;

/// Application Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// 応募種別の不正とスキーマ違反の両方を含む
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("リクエストボディが JSON ではありません: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<ApplicationError> for GatewayResponse {
    fn from(error: ApplicationError) -> Self {
        let (status, body) = match &error {
            ApplicationError::MethodNotAllowed => (405, ErrorResponse::method_not_allowed()),
            ApplicationError::Domain(DomainError::InvalidApplicationType) => {
                (400, ErrorResponse::new(error.to_string()))
            }
            ApplicationError::Domain(DomainError::Validation(message)) => {
                (422, ErrorResponse::new(message.clone()))
            }
            ApplicationError::MalformedBody(e) => {
                tracing::error!(error = %e, "リクエストボディの解析に失敗");
                (500, ErrorResponse::internal_error())
            }
            ApplicationError::Database(e) => {
                tracing::error!(
                    error = %e,
                    constraint = e.violated_constraint(),
                    span_trace = %e.span_trace(),
                    "応募の保存に失敗"
                );
                (500, ErrorResponse::internal_error())
            }
        };
        GatewayResponse::error(status, &body).not_base64()
    }
}
