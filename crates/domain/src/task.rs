//! # タスク
//!
//! グループに紐づくタスク。担当社員は任意。
//!
//! ## ステータス
//!
//! ステータスは自由入力の文字列（画面上は `todo` → `in_progress` → `completed`）。
//! `completed` への更新時のみ、同じ UPDATE 文で `completed_at` をサーバー時刻で埋める。
//! `completed_at` をクライアントが直接指定することはできない。

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    employee::EmployeeId,
    group::GroupId,
    update::Assignment,
    validation::present,
};

define_serial_id! {
    /// タスク ID
    ///
    /// tasks テーブルの主キー（SERIAL）。
    pub struct TaskId;
}

/// タスクステータスの既定値
pub const DEFAULT_TASK_STATUS: &str = "todo";
/// タスク優先度の既定値
pub const DEFAULT_TASK_PRIORITY: &str = "medium";
/// 完了ステータス
pub const COMPLETED_STATUS: &str = "completed";

/// 一覧表示用のタスク（担当社員名・グループ名付き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id:            TaskId,
    pub group_id:      Option<GroupId>,
    pub employee_id:   Option<EmployeeId>,
    pub title:         String,
    pub description:   Option<String>,
    pub status:        Option<String>,
    pub priority:      Option<String>,
    pub due_date:      Option<NaiveDate>,
    pub created_at:    Option<NaiveDateTime>,
    pub completed_at:  Option<NaiveDateTime>,
    pub employee_name: Option<String>,
    pub group_name:    Option<String>,
}

/// タスク作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTask {
    pub group_id:    Option<GroupId>,
    pub employee_id: Option<EmployeeId>,
    pub title:       String,
    pub description: Option<String>,
    pub status:      Option<String>,
    pub priority:    Option<String>,
    pub due_date:    Option<NaiveDate>,
}

impl NewTask {
    /// 保存するステータス（未指定なら `todo`）
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_TASK_STATUS)
    }

    /// 保存する優先度（未指定なら `medium`）
    pub fn priority(&self) -> &str {
        self.priority.as_deref().unwrap_or(DEFAULT_TASK_PRIORITY)
    }
}

/// タスク更新リクエスト
///
/// 更新できるのは status / title / employee_id のみ。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskUpdate {
    pub id:          Option<TaskId>,
    #[serde(default, deserialize_with = "present")]
    pub status:      Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub title:       Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub employee_id: Option<Option<EmployeeId>>,
}

impl TaskUpdate {
    /// `completed` への遷移を含むか
    pub fn completes(&self) -> bool {
        matches!(&self.status, Some(Some(status)) if status == COMPLETED_STATUS)
    }

    /// 指定されたフィールドだけの SET 句を返す
    ///
    /// 完了への遷移では `completed_at = CURRENT_TIMESTAMP` を status の直後に加える。
    pub fn assignments(&self) -> Vec<Assignment> {
        let mut assignments = Vec::new();

        if let Some(status) = &self.status {
            assignments.push(Assignment::text("status", status.clone()));
            if self.completes() {
                assignments.push(Assignment::current_timestamp("completed_at"));
            }
        }
        if let Some(title) = &self.title {
            assignments.push(Assignment::text("title", title.clone()));
        }
        if let Some(employee_id) = &self.employee_id {
            assignments.push(Assignment::integer(
                "employee_id",
                employee_id.map(|id| id.as_i32()),
            ));
        }

        assignments
    }
}
