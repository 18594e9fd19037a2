//! # 入力スキーマの検証
//!
//! リクエストボディ（パース済みの JSON 値）をスキーマ構造体に変換し、
//! `validator` のフィールド制約（最小長、数値範囲、メール形式）を評価する。
//!
//! 変換・検証のどちらで失敗しても [`DomainError::Validation`] を返す。
//! JSON として壊れているボディの扱いはハンドラごとに異なるため、
//! ここでは扱わない（呼び出し側で `serde_json::Value` にパースしてから渡す）。

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::DomainError;

/// JSON 値をスキーマ構造体に変換する（制約の評価なし）
///
/// 必須フィールドの欠落や型の不一致はここで検出される。
pub fn deserialize_schema<T: DeserializeOwned>(value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| DomainError::Validation(e.to_string()))
}

/// JSON 値をスキーマ構造体に変換し、フィールド制約を評価する
pub fn parse_schema<T: DeserializeOwned + Validate>(value: Value) -> Result<T, DomainError> {
    let schema: T = deserialize_schema(value)?;
    schema
        .validate()
        .map_err(|e| DomainError::Validation(describe(&e)))?;
    Ok(schema)
}

/// `ValidationErrors` をクライアント向けの 1 行メッセージにする
///
/// 形式: `email: email; name: length`（フィールド名順）
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// 「キーが存在する」ことを `Some` で表すデシリアライザ
///
/// `#[serde(default, deserialize_with = "present")]` と組み合わせて
/// `Option<Option<T>>` に使う。
///
/// - キーなし → `None`（変更しない）
/// - `null` → `Some(None)`（NULL を書き込む）
/// - 値あり → `Some(Some(v))`
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        name:  String,
        #[validate(email)]
        email: String,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "present")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_parse_schema_正常な値を受け付ける() {
        let sample: Sample =
            parse_schema(json!({ "name": "Анна", "email": "anna@example.com" })).unwrap();
        assert_eq!(sample.name, "Анна");
    }

    #[test]
    fn test_parse_schema_制約違反をフィールド名順にまとめる() {
        let err = parse_schema::<Sample>(json!({ "name": "", "email": "not-an-email" }))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("email: email; name: length".to_string())
        );
    }

    #[test]
    fn test_parse_schema_必須フィールド欠落はバリデーションエラー() {
        let err = parse_schema::<Sample>(json!({ "name": "Анна" })).unwrap_err();
        let DomainError::Validation(msg) = err else {
            panic!("Validation であること");
        };
        assert!(msg.contains("missing field `email`"), "{msg}");
    }

    #[test]
    fn test_present_キーなし_null_値ありを区別する() {
        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        let null: Patch = serde_json::from_value(json!({ "note": null })).unwrap();
        let value: Patch = serde_json::from_value(json!({ "note": "x" })).unwrap();

        assert_eq!(absent.note, None);
        assert_eq!(null.note, Some(None));
        assert_eq!(value.note, Some(Some("x".to_string())));
    }
}
