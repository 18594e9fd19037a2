//! # Mailer Service エラー定義
//!
//! 確認メール送信 API 固有のエラーと、ゲートウェイレスポンスへの変換を定義する。

use staffdesk_domain::{DomainError, notification::NotificationError};
use staffdesk_shared::{ErrorResponse, GatewayResponse};
use thiserror::Error;

/// Mailer Service で発生するエラー
#[derive(Debug, Error)]
pub enum MailerError {
    /// POST / OPTIONS 以外のメソッド
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// ボディが JSON として読めない
    #[error("リクエストボディが JSON ではありません: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// 入力スキーマ違反
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// SMTP 未設定・送信失敗
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl MailerError {
    fn status_and_body(&self) -> (u16, ErrorResponse) {
        match self {
            Self::MethodNotAllowed => (405, ErrorResponse::method_not_allowed()),
            Self::InvalidJson(_) => (400, ErrorResponse::invalid_json()),
            Self::Validation(e) => (422, ErrorResponse::new(e.to_string())),
            Self::Notification(NotificationError::NotConfigured) => {
                tracing::error!("SMTP 設定がないため送信できません");
                (500, ErrorResponse::new(NotificationError::NotConfigured.to_string()))
            }
            Self::Notification(e) => {
                tracing::error!(error = %e, "確認メールの送信に失敗");
                (500, ErrorResponse::internal_error())
            }
        }
    }
}

impl From<MailerError> for GatewayResponse {
    fn from(error: MailerError) -> Self {
        let (status, body) = error.status_and_body();
        GatewayResponse::error(status, &body).not_base64()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(MailerError::MethodNotAllowed, 405, "Method not allowed")]
    #[case(
        MailerError::Validation(DomainError::validation("email: email")),
        422,
        "email: email"
    )]
    #[case(
        MailerError::Notification(NotificationError::NotConfigured),
        500,
        "SMTP configuration missing"
    )]
    #[case(
        MailerError::Notification(NotificationError::SendFailed("535 auth".to_string())),
        500,
        "Internal server error"
    )]
    fn test_エラーごとのステータスとメッセージ(
        #[case] error: MailerError,
        #[case] status: u16,
        #[case] message: &str,
    ) {
        let response = GatewayResponse::from(error);

        assert_eq!(response.status_code, status);
        assert_eq!(
            response.body,
            serde_json::to_string(&ErrorResponse::new(message)).unwrap()
        );
        assert_eq!(response.is_base64_encoded, Some(false));
    }
}
