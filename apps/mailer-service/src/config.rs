//! # Mailer Service 設定
//!
//! 環境変数から確認メール送信サーバーの設定を読み込む。
//! SMTP 設定が揃っていなくても起動はでき、送信要求に 500 を返す。

use staffdesk_infra::notification::{SmtpConfig, SmtpConfigError};
use thiserror::Error;

/// 既定のポート番号
const DEFAULT_PORT: u16 = 3002;

/// 確認メール送信サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// SMTP 設定（未設定なら `None`）
    pub smtp: Option<SmtpConfig>,
}

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),

    #[error(transparent)]
    Smtp(#[from] SmtpConfigError),
}

impl MailerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            smtp: SmtpConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_smtp未設定でも読み込める() {
        let config = MailerConfig::from_lookup(|_| None).unwrap();

        assert_eq!(
            config,
            MailerConfig {
                host: "0.0.0.0".to_string(),
                port: 3002,
                smtp: None,
            }
        );
    }

    #[test]
    fn test_smtp設定を読み込む() {
        let config = MailerConfig::from_lookup(|key| match key {
            "SMTP_HOST" => Some("smtp.example.com".to_string()),
            "SMTP_USER" => Some("hr@example.com".to_string()),
            "SMTP_PASSWORD" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();

        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 587);
    }

    #[test]
    fn test_不正なsmtp_portはエラー() {
        let err = MailerConfig::from_lookup(|key| {
            (key == "SMTP_PORT").then(|| "abc".to_string())
        })
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Smtp(SmtpConfigError::InvalidPort("abc".to_string()))
        );
    }
}
