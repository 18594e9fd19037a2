//! # EmployeeRepository
//!
//! 社員の一覧取得・登録・部分更新を担当する。

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use staffdesk_domain::{
    employee::{Employee, EmployeeId, NewEmployee},
    group::GroupId,
    update::Assignment,
};

use super::build_update;
use crate::error::InfraError;

/// 社員リポジトリトレイト
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// 社員一覧をグループ名付きで取得する
    ///
    /// `group_id` 指定時はそのグループの社員を ID 昇順、
    /// 未指定時は全社員を (group_id, id) 順で返す。
    async fn find_all(&self, group_id: Option<GroupId>) -> Result<Vec<Employee>, InfraError>;

    /// 社員を登録し、採番された ID を返す
    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, InfraError>;

    /// 指定カラムだけを更新する
    ///
    /// `assignments` が空なら何も発行しない。
    async fn update(&self, id: EmployeeId, assignments: &[Assignment]) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の EmployeeRepository
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id:         i32,
    group_id:   Option<i32>,
    name:       String,
    position:   Option<String>,
    email:      Option<String>,
    phone:      Option<String>,
    status:     Option<String>,
    hired_date: Option<NaiveDate>,
    created_at: Option<NaiveDateTime>,
    group_name: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id:         EmployeeId::from_i32(row.id),
            group_id:   row.group_id.map(GroupId::from_i32),
            name:       row.name,
            position:   row.position,
            email:      row.email,
            phone:      row.phone,
            status:     row.status,
            hired_date: row.hired_date,
            created_at: row.created_at,
            group_name: row.group_name,
        }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(group_id = ?group_id))]
    async fn find_all(&self, group_id: Option<GroupId>) -> Result<Vec<Employee>, InfraError> {
        let rows = match group_id {
            Some(group_id) => {
                sqlx::query_as::<_, EmployeeRow>(
                    r#"
                    SELECT
                        e.id, e.group_id, e.name, e.position, e.email, e.phone,
                        e.status, e.hired_date, e.created_at,
                        g.name AS group_name
                    FROM employees e
                    LEFT JOIN groups g ON e.group_id = g.id
                    WHERE e.group_id = $1
                    ORDER BY e.id
                    "#,
                )
                .bind(group_id.as_i32())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EmployeeRow>(
                    r#"
                    SELECT
                        e.id, e.group_id, e.name, e.position, e.email, e.phone,
                        e.status, e.hired_date, e.created_at,
                        g.name AS group_name
                    FROM employees e
                    LEFT JOIN groups g ON e.group_id = g.id
                    ORDER BY e.group_id, e.id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, InfraError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO employees (group_id, name, position, email, phone, status, hired_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(employee.group_id.map(|id| id.as_i32()))
        .bind(&employee.name)
        .bind(&employee.position)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(employee.status())
        .bind(employee.hired_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(EmployeeId::from_i32(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, columns = assignments.len()))]
    async fn update(&self, id: EmployeeId, assignments: &[Assignment]) -> Result<(), InfraError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        build_update("employees", id.as_i32(), assignments)
            .build()
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}
