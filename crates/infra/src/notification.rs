//! # 通知送信
//!
//! 応募受付の確認メールの生成と送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **生成は 1 か所**: 確認メール送信 API と応募受付 API は同じ
//!   [`ConfirmationMailer`]（[`TemplateRenderer`] + 送信手段）を使う
//! - **設定は明示的に渡す**: [`SmtpConfig`] は起動時に 1 度だけ読み込み、
//!   揃っていなければ `None` として扱う

mod confirmation;
mod smtp;
mod template_renderer;

use async_trait::async_trait;
pub use confirmation::ConfirmationMailer;
pub use smtp::SmtpNotificationSender;
use staffdesk_domain::notification::{EmailMessage, NotificationError};
pub use template_renderer::{CONFIRMATION_SUBJECT, TemplateRenderer};
use thiserror::Error;

/// SMTP ポートの既定値（submission / STARTTLS）
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// SMTP リレーの接続設定
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// SMTP ホスト
    pub host:     String,
    /// SMTP ポート
    pub port:     u16,
    /// ログインユーザー（送信元アドレスを兼ねる）
    pub user:     String,
    /// ログインパスワード
    pub password: String,
}

// パスワードをログに出さない
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

/// SMTP 設定の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SmtpConfigError {
    /// SMTP_PORT がポート番号として読めない
    #[error("SMTP_PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

impl SmtpConfig {
    /// 環境変数 `SMTP_HOST` / `SMTP_PORT` / `SMTP_USER` / `SMTP_PASSWORD` から読み込む
    pub fn from_env() -> Result<Option<Self>, SmtpConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込む
    ///
    /// ホスト・ユーザー・パスワードのいずれかが未設定（または空）なら `Ok(None)`。
    /// ポートは未設定なら 587。
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, SmtpConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match non_empty("SMTP_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| SmtpConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_SMTP_PORT,
        };

        let (Some(host), Some(user), Some(password)) = (
            non_empty("SMTP_HOST"),
            non_empty("SMTP_USER"),
            non_empty("SMTP_PASSWORD"),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            host,
            port,
            user,
            password,
        }))
    }
}
