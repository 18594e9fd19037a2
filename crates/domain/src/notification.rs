//! # 通知
//!
//! 応募受付の確認メールに関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **生成と送信の分離**: [`ApplicationReceived`] からの本文生成はレンダラー、
//!   送信は `NotificationSender` が担当する（いずれもインフラ層）
//! - **失敗の扱いは呼び出し側が決める**: 確認メール送信 API では失敗は 500、
//!   応募受付 API では `email_sent: false` として握りつぶす

use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// SMTP 設定が揃っていない
    #[error("SMTP configuration missing")]
    NotConfigured,

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 応募受付の確認メールの宛先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationReceived {
    pub name:    String,
    pub surname: String,
    pub email:   String,
}

impl ApplicationReceived {
    /// 本文の宛名（`名 姓`）
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_nameは名と姓を空白で連結する() {
        let received = ApplicationReceived {
            name:    "Анна".to_string(),
            surname: "Орлова".to_string(),
            email:   "anna@example.com".to_string(),
        };
        assert_eq!(received.full_name(), "Анна Орлова");
    }

    #[test]
    fn test_not_configuredのメッセージ() {
        assert_eq!(
            NotificationError::NotConfigured.to_string(),
            "SMTP configuration missing"
        );
    }
}
