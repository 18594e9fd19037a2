//! # Department Service 設定
//!
//! 環境変数から部署 API サーバーの設定を読み込む。

use thiserror::Error;

/// 既定のポート番号
const DEFAULT_PORT: u16 = 3001;

/// 部署 API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
}

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

impl DepartmentConfig {
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
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_未設定の項目は既定値になる() {
        let config = DepartmentConfig::from_lookup(|key| {
            (key == "DATABASE_URL").then(|| "postgres://localhost/staffdesk".to_string())
        })
        .unwrap();

        assert_eq!(
            config,
            DepartmentConfig {
                host:         "0.0.0.0".to_string(),
                port:         3001,
                database_url: "postgres://localhost/staffdesk".to_string(),
            }
        );
    }

    #[test]
    fn test_database_urlは必須() {
        let err = DepartmentConfig::from_lookup(|_| None).unwrap_err();

        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_不正なポートはエラー() {
        let err = DepartmentConfig::from_lookup(|key| match key {
            "PORT" => Some("http".to_string()),
            _ => Some("postgres://localhost/staffdesk".to_string()),
        })
        .unwrap_err();

        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }
}
