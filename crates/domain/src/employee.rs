//! # 社員
//!
//! グループに所属する社員。POST で作成し、PUT で
//! name / position / email / phone / status のみ部分更新できる。

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    group::GroupId,
    update::Assignment,
    validation::present,
};

define_serial_id! {
    /// 社員 ID
    ///
    /// employees テーブルの主キー（SERIAL）。
    pub struct EmployeeId;
}

/// 社員ステータスの既定値
pub const DEFAULT_EMPLOYEE_STATUS: &str = "active";

/// 一覧表示用の社員（所属グループ名付き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id:         EmployeeId,
    pub group_id:   Option<GroupId>,
    pub name:       String,
    pub position:   Option<String>,
    pub email:      Option<String>,
    pub phone:      Option<String>,
    pub status:     Option<String>,
    pub hired_date: Option<NaiveDate>,
    pub created_at: Option<NaiveDateTime>,
    pub group_name: Option<String>,
}

/// 社員作成リクエスト
///
/// `group_id` の存在確認は行わない（DB の参照制約に委ねる）。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEmployee {
    pub group_id:   Option<GroupId>,
    pub name:       String,
    pub position:   Option<String>,
    pub email:      Option<String>,
    pub phone:      Option<String>,
    pub status:     Option<String>,
    pub hired_date: Option<NaiveDate>,
}

impl NewEmployee {
    /// 保存するステータス（未指定なら `active`）
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_EMPLOYEE_STATUS)
    }
}

/// 社員更新リクエスト
///
/// 各フィールドは「キーが存在したか」を `Option<Option<_>>` で保持する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    pub id:       Option<EmployeeId>,
    #[serde(default, deserialize_with = "present")]
    pub name:     Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub position: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email:    Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone:    Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub status:   Option<Option<String>>,
}

impl EmployeeUpdate {
    /// 指定されたフィールドだけの SET 句を返す
    pub fn assignments(&self) -> Vec<Assignment> {
        [
            ("name", &self.name),
            ("position", &self.position),
            ("email", &self.email),
            ("phone", &self.phone),
            ("status", &self.status),
        ]
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .as_ref()
                .map(|value| Assignment::text(column, value.clone()))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{DomainError, validation::parse_schema};

    #[test]
    fn test_new_employee_ステータス未指定ならactive() {
        let employee: NewEmployee = parse_schema(json!({ "name": "Ольга" })).unwrap();
        assert_eq!(employee.status(), "active");
        assert_eq!(employee.group_id, None);
    }

    #[test]
    fn test_new_employee_指定したステータスを使う() {
        let employee: NewEmployee =
            parse_schema(json!({ "name": "Ольга", "status": "vacation" })).unwrap();
        assert_eq!(employee.status(), "vacation");
    }

    #[test]
    fn test_new_employee_日付をパースする() {
        let employee: NewEmployee =
            parse_schema(json!({ "name": "Ольга", "hired_date": "2023-09-01" })).unwrap();
        assert_eq!(
            employee.hired_date,
            Some(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap())
        );
    }

    #[test]
    fn test_new_employee_名前なしはバリデーションエラー() {
        let err = parse_schema::<NewEmployee>(json!({ "position": "QA" })).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_new_employee_空の名前はキーがあれば受け付ける() {
        let employee = parse_schema::<NewEmployee>(json!({ "name": "" })).unwrap();
        assert_eq!(employee.name, "");
    }

    #[test]
    fn test_new_employee_nullの名前はバリデーションエラー() {
        let err = parse_schema::<NewEmployee>(json!({ "name": null })).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_employee_update_指定フィールドのみ割り当てる() {
        let update: EmployeeUpdate =
            serde_json::from_value(json!({ "id": 5, "phone": null, "status": "inactive" }))
                .unwrap();

        assert_eq!(update.id, Some(EmployeeId::from_i32(5)));
        assert_eq!(
            update.assignments(),
            vec![
                Assignment::text("phone", None),
                Assignment::text("status", Some("inactive".to_string())),
            ]
        );
    }

    #[test]
    fn test_employee_update_許可リスト外のキーは無視する() {
        let update: EmployeeUpdate =
            serde_json::from_value(json!({ "id": 5, "group_id": 9, "hired_date": "2020-01-01" }))
                .unwrap();
        assert!(update.assignments().is_empty());
    }
}
