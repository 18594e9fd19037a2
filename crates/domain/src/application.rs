//! # 応募
//!
//! 採用ページから送信される応募。応募者（applicant）と学生（student）の
//! 2 種類があり、必須フィールドの組が互いに異なる。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 必須フィールド |
//! |---|------------|------|
//! | [`ApplicantForm`] | 応募者 | position, experience (≥0), cover_letter |
//! | [`StudentForm`] | 学生 | university, course (1〜6), specialty, direction, motivation_letter |
//!
//! 共通の必須フィールドは name / surname / email / phone、任意は portfolio_url。
//! 応募は一度だけ作成され、このシステムでは更新しない。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoStaticStr;
use validator::Validate;

use crate::{DomainError, notification::ApplicationReceived, validation::parse_schema};

define_serial_id! {
    /// 応募 ID
    ///
    /// applications テーブルの主キー（SERIAL）。
    pub struct ApplicationId;
}

/// 応募種別
///
/// applications テーブルの `application_type` カラムに格納される値。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApplicationType {
    /// 応募者（経験者採用）
    Applicant,
    /// 学生（インターン）
    Student,
}

impl ApplicationType {
    /// DB 格納用の文字列
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// リクエストボディの `application_type` を読み取る
    ///
    /// 欠落・文字列以外・未知の値はすべて [`DomainError::InvalidApplicationType`]。
    pub fn from_body(body: &Value) -> Result<Self, DomainError> {
        body.get("application_type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or(DomainError::InvalidApplicationType)
    }
}

/// 応募者のフォーム
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ApplicantForm {
    #[validate(length(min = 1))]
    pub name:          String,
    #[validate(length(min = 1))]
    pub surname:       String,
    #[validate(email)]
    pub email:         String,
    #[validate(length(min = 1))]
    pub phone:         String,
    #[validate(length(min = 1))]
    pub position:      String,
    #[validate(range(min = 0))]
    pub experience:    i32,
    #[validate(length(min = 1))]
    pub cover_letter:  String,
    pub portfolio_url: Option<String>,
}

/// 学生のフォーム
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct StudentForm {
    #[validate(length(min = 1))]
    pub name:              String,
    #[validate(length(min = 1))]
    pub surname:           String,
    #[validate(email)]
    pub email:             String,
    #[validate(length(min = 1))]
    pub phone:             String,
    #[validate(length(min = 1))]
    pub university:        String,
    #[validate(range(min = 1, max = 6))]
    pub course:            i32,
    #[validate(length(min = 1))]
    pub specialty:         String,
    #[validate(length(min = 1))]
    pub direction:         String,
    #[validate(length(min = 1))]
    pub motivation_letter: String,
    pub portfolio_url:     Option<String>,
}

/// 検証済みの応募
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Application {
    Applicant(ApplicantForm),
    Student(StudentForm),
}

impl Application {
    /// リクエストボディから応募を組み立てる
    ///
    /// 1. `application_type` で形を選ぶ（不正なら `InvalidApplicationType`）
    /// 2. 選んだ形のスキーマで検証する（失敗は `Validation`）
    pub fn from_body(body: Value) -> Result<Self, DomainError> {
        match ApplicationType::from_body(&body)? {
            ApplicationType::Applicant => Ok(Self::Applicant(parse_schema(body)?)),
            ApplicationType::Student => Ok(Self::Student(parse_schema(body)?)),
        }
    }

    pub fn application_type(&self) -> ApplicationType {
        match self {
            Self::Applicant(_) => ApplicationType::Applicant,
            Self::Student(_) => ApplicationType::Student,
        }
    }

    /// 確認メールの宛先情報
    pub fn confirmation(&self) -> ApplicationReceived {
        let (name, surname, email) = match self {
            Self::Applicant(form) => (&form.name, &form.surname, &form.email),
            Self::Student(form) => (&form.name, &form.surname, &form.email),
        };
        ApplicationReceived {
            name:    name.clone(),
            surname: surname.clone(),
            email:   email.clone(),
        }
    }
}

/// 確認メール送信リクエスト
///
/// `application_type` は宛先の分類にのみ使い、本文は種別によらず共通。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfirmationRequest {
    #[validate(length(min = 1))]
    pub name:             String,
    #[validate(length(min = 1))]
    pub surname:          String,
    #[validate(email)]
    pub email:            String,
    pub application_type: ApplicationType,
}

impl ConfirmationRequest {
    pub fn confirmation(&self) -> ApplicationReceived {
        ApplicationReceived {
            name:    self.name.clone(),
            surname: self.surname.clone(),
            email:   self.email.clone(),
        }
    }
}
