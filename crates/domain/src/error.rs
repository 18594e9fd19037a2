//! # ドメイン層エラー定義
//!
//! 入力検証の失敗など、ドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 / 422 | スキーマ検証の失敗（ステータスは呼び出し側のハンドラが決める） |
//! | `InvalidApplicationType` | 400 | `application_type` が未知の値 |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの欠落、型の不一致、文字数・数値範囲・メール形式の違反など。
    /// メッセージはそのままクライアントに返されるため、内部情報を含めない。
    #[error("{0}")]
    Validation(String),

    /// 応募種別が不正
    ///
    /// `application_type` が `applicant` / `student` のいずれでもない、または欠落している。
    #[error("Invalid application_type")]
    InvalidApplicationType,
}

impl DomainError {
    /// バリデーションエラーを生成する
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
