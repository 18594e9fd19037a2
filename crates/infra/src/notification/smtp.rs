//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` で SMTP リレーに STARTTLS 接続し、
//! ログイン後に 1 通だけ送信する。接続はプールせず、送信ごとに開いて閉じる。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use staffdesk_domain::notification::{EmailMessage, NotificationError};

use super::{NotificationSender, SmtpConfig};

/// SMTP 通知送信
///
/// 送信元アドレスは SMTP のログインユーザーを使う。
/// ログイン名がメールアドレスでない、ホスト名が不正といった問題は
/// 起動時ではなく送信時に [`NotificationError::SendFailed`] として表面化する。
pub struct SmtpNotificationSender {
    config: SmtpConfig,
}

impl SmtpNotificationSender {
    /// 設定から送信インスタンスを作成する（接続はまだ行わない）
    pub fn new(config: &SmtpConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 接続設定不正: {e}")))?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.user.clone(),
                self.config.password.clone(),
            ))
            .build();
        Ok(transport)
    }

    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let from: Mailbox = self
            .config
            .user
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?;

        Message::builder()
            .from(from)
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    #[tracing::instrument(skip_all, level = "debug", fields(to = %email.to))]
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = self.build_message(email)?;

        self.transport()?
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        tracing::info!(to = %email.to, "確認メールを送信しました");
        Ok(())
    }
}
