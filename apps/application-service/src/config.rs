//! # Application Service 設定
//!
//! 応募受付 API の設定。DB 接続は必須、SMTP は任意。

use staffdesk_infra::notification::{SmtpConfig, SmtpConfigError};
use thiserror::Error;

const DEFAULT_PORT: u16 = 3003;

/// 応募受付 API サーバーの設定
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationConfig {
    pub host:         String,
    pub port:         u16,
    pub database_url: String,
    /// 未設定なら確認メールは送らず `email_sent: false` を返す
    pub smtp:         Option<SmtpConfig>,
}

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),

    #[error(transparent)]
    Smtp(#[from] SmtpConfigError),
}

impl ApplicationConfig {
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
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            smtp: SmtpConfig::from_lookup(&lookup)?,
        })
    }
}
