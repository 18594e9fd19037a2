//! # グループ
//!
//! 社員とタスクをまとめる単位。グループ自体はこのシステムの外で作成され、
//! ここでは所属社員数・タスク数を集計して読み出すだけ。

use chrono::NaiveDateTime;
use serde::Serialize;

define_serial_id! {
    /// グループ ID
    ///
    /// groups テーブルの主キー（SERIAL）。
    pub struct GroupId;
}

/// 集計付きのグループ
///
/// `employee_count` / `task_count` はリクエストごとに DB 上で数え直した値。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub id:             GroupId,
    pub name:           String,
    pub description:    Option<String>,
    pub created_at:     Option<NaiveDateTime>,
    pub employee_count: i64,
    pub task_count:     i64,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_シリアライズで日時がiso8601文字列になる() {
        let created_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let group = GroupSummary {
            id: GroupId::from_i32(1),
            name: "Разработка".to_string(),
            description: None,
            created_at: Some(created_at),
            employee_count: 4,
            task_count: 7,
        };

        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({
                "id": 1,
                "name": "Разработка",
                "description": null,
                "created_at": "2024-03-01T09:30:00",
                "employee_count": 4,
                "task_count": 7,
            })
        );
    }

    #[test]
    fn test_created_atがnullのままシリアライズされる() {
        let group = GroupSummary {
            id: GroupId::from_i32(2),
            name: "HR".to_string(),
            description: Some("Отдел кадров".to_string()),
            created_at: None,
            employee_count: 0,
            task_count: 0,
        };

        let value = serde_json::to_value(&group).unwrap();
        assert!(value["created_at"].is_null());
    }
}
