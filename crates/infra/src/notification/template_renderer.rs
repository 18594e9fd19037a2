//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで応募受付の確認メールを HTML/plaintext 両形式で生成する。
//!
//! テンプレートは `include_str!` でバイナリに埋め込む。
//! `.html` テンプレートは tera の自動エスケープが効くため、
//! 応募者が入力した氏名はそのまま渡してよい。

use staffdesk_domain::notification::{ApplicationReceived, EmailMessage, NotificationError};
use tera::{Context, Tera};

/// 確認メールの件名
pub const CONFIRMATION_SUBJECT: &str = "Ваша анкета получена";

const HTML_TEMPLATE: &str = "application_received.html";
const TEXT_TEMPLATE: &str = "application_received.txt";

/// テンプレートレンダラー
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    HTML_TEMPLATE,
                    include_str!("../../../../templates/notifications/application_received.html"),
                ),
                (
                    TEXT_TEMPLATE,
                    include_str!("../../../../templates/notifications/application_received.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 確認メールを生成する
    pub fn render(&self, received: &ApplicationReceived) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("full_name", &received.full_name());

        let html_body = self
            .engine
            .render(HTML_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(TEXT_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: received.email.clone(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            html_body,
            text_body,
        })
    }
}
