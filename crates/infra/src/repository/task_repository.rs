//! # TaskRepository
//!
//! タスクの一覧取得・登録・部分更新を担当する。
//!
//! 完了への遷移時の `completed_at` 打刻はドメイン層の [`TaskUpdate`] が
//! `CURRENT_TIMESTAMP` の代入として SET 句に含めるため、ここでは特別扱いしない。
//!
//! [`TaskUpdate`]: staffdesk_domain::task::TaskUpdate

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use staffdesk_domain::{
    employee::EmployeeId,
    group::GroupId,
    task::{NewTask, Task, TaskId},
    update::Assignment,
};

use super::build_update;
use crate::error::InfraError;

/// タスクリポジトリトレイト
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// タスク一覧を担当社員名・グループ名付きで取得する
    ///
    /// `group_id` 指定時はそのグループのタスクを ID 降順、
    /// 未指定時は全タスクを作成日時の降順で返す。
    async fn find_all(&self, group_id: Option<GroupId>) -> Result<Vec<Task>, InfraError>;

    /// タスクを登録し、採番された ID を返す
    async fn insert(&self, task: &NewTask) -> Result<TaskId, InfraError>;

    /// 指定カラムだけを更新する
    ///
    /// `assignments` が空なら何も発行しない。
    async fn update(&self, id: TaskId, assignments: &[Assignment]) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id:            i32,
    group_id:      Option<i32>,
    employee_id:   Option<i32>,
    title:         String,
    description:   Option<String>,
    status:        Option<String>,
    priority:      Option<String>,
    due_date:      Option<NaiveDate>,
    created_at:    Option<NaiveDateTime>,
    completed_at:  Option<NaiveDateTime>,
    employee_name: Option<String>,
    group_name:    Option<String>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id:            TaskId::from_i32(row.id),
            group_id:      row.group_id.map(GroupId::from_i32),
            employee_id:   row.employee_id.map(EmployeeId::from_i32),
            title:         row.title,
            description:   row.description,
            status:        row.status,
            priority:      row.priority,
            due_date:      row.due_date,
            created_at:    row.created_at,
            completed_at:  row.completed_at,
            employee_name: row.employee_name,
            group_name:    row.group_name,
        }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(group_id = ?group_id))]
    async fn find_all(&self, group_id: Option<GroupId>) -> Result<Vec<Task>, InfraError> {
        let rows = match group_id {
            Some(group_id) => {
                sqlx::query_as::<_, TaskRow>(
                    r#"
                    SELECT
                        t.id, t.group_id, t.employee_id, t.title, t.description,
                        t.status, t.priority, t.due_date, t.created_at, t.completed_at,
                        e.name AS employee_name,
                        g.name AS group_name
                    FROM tasks t
                    LEFT JOIN employees e ON t.employee_id = e.id
                    LEFT JOIN groups g ON t.group_id = g.id
                    WHERE t.group_id = $1
                    ORDER BY t.id DESC
                    "#,
                )
                .bind(group_id.as_i32())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TaskRow>(
                    r#"
                    SELECT
                        t.id, t.group_id, t.employee_id, t.title, t.description,
                        t.status, t.priority, t.due_date, t.created_at, t.completed_at,
                        e.name AS employee_name,
                        g.name AS group_name
                    FROM tasks t
                    LEFT JOIN employees e ON t.employee_id = e.id
                    LEFT JOIN groups g ON t.group_id = g.id
                    ORDER BY t.created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Task::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, task: &NewTask) -> Result<TaskId, InfraError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (group_id, employee_id, title, description, status, priority, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(task.group_id.map(|id| id.as_i32()))
        .bind(task.employee_id.map(|id| id.as_i32()))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status())
        .bind(task.priority())
        .bind(task.due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TaskId::from_i32(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, columns = assignments.len()))]
    async fn update(&self, id: TaskId, assignments: &[Assignment]) -> Result<(), InfraError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        build_update("tasks", id.as_i32(), assignments)
            .build()
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}
