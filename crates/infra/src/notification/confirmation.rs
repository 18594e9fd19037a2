//! # 確認メール送信
//!
//! 応募受付の確認メールをレンダリングして送信する。
//! 確認メール送信 API と応募受付 API の両方から使われる。
//!
//! SMTP 設定がない場合は送信を試みずに [`NotificationError::NotConfigured`] を返す。
//! それを 500 にするか `email_sent: false` にするかは呼び出し側が決める。

use std::sync::Arc;

use staffdesk_domain::notification::{ApplicationReceived, NotificationError};

use super::{NotificationSender, SmtpConfig, SmtpNotificationSender, TemplateRenderer};

/// 確認メールの送信者
pub struct ConfirmationMailer {
    renderer: TemplateRenderer,
    sender:   Option<Arc<dyn NotificationSender>>,
}

impl ConfirmationMailer {
    /// レンダラーと送信手段を指定して作成する（`None` は SMTP 未設定）
    pub fn new(renderer: TemplateRenderer, sender: Option<Arc<dyn NotificationSender>>) -> Self {
        Self { renderer, sender }
    }

    /// SMTP 設定から作成する
    ///
    /// SMTP 設定の中身はここでは検証しない。失敗するのはテンプレートの登録だけ。
    pub fn from_config(config: Option<&SmtpConfig>) -> Result<Self, NotificationError> {
        let sender = config.map(|config| {
            Arc::new(SmtpNotificationSender::new(config)) as Arc<dyn NotificationSender>
        });

        Ok(Self::new(TemplateRenderer::new()?, sender))
    }

    /// SMTP が設定されているか
    pub fn is_configured(&self) -> bool {
        self.sender.is_some()
    }

    /// 確認メールを 1 通送信する
    pub async fn send(&self, received: &ApplicationReceived) -> Result<(), NotificationError> {
        let Some(sender) = &self.sender else {
            return Err(NotificationError::NotConfigured);
        };

        let email = self.renderer.render(received)?;
        sender.send_email(&email).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::{FailingNotificationSender, RecordingNotificationSender};

    fn received() -> ApplicationReceived {
        ApplicationReceived {
            name:    "Анна".to_string(),
            surname: "Орлова".to_string(),
            email:   "anna@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_レンダリングしたメールを送信する() {
        let recorder = RecordingNotificationSender::new();
        let mailer = ConfirmationMailer::new(
            TemplateRenderer::new().unwrap(),
            Some(Arc::new(recorder.clone())),
        );

        mailer.send(&received()).await.unwrap();

        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "anna@example.com");
        assert_eq!(sent[0].subject, "Ваша анкета получена");
    }

    #[tokio::test]
    async fn test_smtp未設定ならnot_configured() {
        let mailer = ConfirmationMailer::from_config(None).unwrap();

        let result = mailer.send(&received()).await;

        assert!(!mailer.is_configured());
        assert!(matches!(result, Err(NotificationError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_アドレスでないsmtpユーザーでも作成でき送信時に失敗する() {
        let config = SmtpConfig {
            host:     "smtp.example.com".to_string(),
            port:     587,
            user:     "apikey".to_string(),
            password: "secret".to_string(),
        };

        let mailer = ConfirmationMailer::from_config(Some(&config)).unwrap();
        let result = mailer.send(&received()).await;

        assert!(mailer.is_configured());
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }

    #[tokio::test]
    async fn test_送信失敗はsend_failed() {
        let mailer = ConfirmationMailer::new(
            TemplateRenderer::new().unwrap(),
            Some(Arc::new(FailingNotificationSender)),
        );

        let result = mailer.send(&received()).await;

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
