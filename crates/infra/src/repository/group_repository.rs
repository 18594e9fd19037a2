//! # GroupRepository
//!
//! グループの読み出しと所属数の集計を担当する。
//! グループの作成・更新はこのシステムの外で行われる。

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use staffdesk_domain::group::{GroupId, GroupSummary};

use crate::error::InfraError;

/// グループリポジトリトレイト
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// 全グループを社員数・タスク数付きで ID 昇順に取得する
    async fn find_all_with_counts(&self) -> Result<Vec<GroupSummary>, InfraError>;
}

/// PostgreSQL 実装の GroupRepository
#[derive(Debug, Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GroupSummaryRow {
    id:             i32,
    name:           String,
    description:    Option<String>,
    created_at:     Option<NaiveDateTime>,
    employee_count: i64,
    task_count:     i64,
}

impl From<GroupSummaryRow> for GroupSummary {
    fn from(row: GroupSummaryRow) -> Self {
        Self {
            id:             GroupId::from_i32(row.id),
            name:           row.name,
            description:    row.description,
            created_at:     row.created_at,
            employee_count: row.employee_count,
            task_count:     row.task_count,
        }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all_with_counts(&self) -> Result<Vec<GroupSummary>, InfraError> {
        // 社員とタスクの両方を外部結合するため、直積の重複を DISTINCT で除く
        let rows = sqlx::query_as::<_, GroupSummaryRow>(
            r#"
            SELECT
                g.id,
                g.name,
                g.description,
                g.created_at,
                COUNT(DISTINCT e.id) AS employee_count,
                COUNT(DISTINCT t.id) AS task_count
            FROM groups g
            LEFT JOIN employees e ON g.id = e.group_id
            LEFT JOIN tasks t ON g.id = t.group_id
            GROUP BY g.id, g.name, g.description, g.created_at
            ORDER BY g.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GroupSummary::from).collect())
    }
}
