//! # リポジトリ実装
//!
//! グループ・社員・タスク・応募の読み書きを提供する。
//!
//! ## 設計方針
//!
//! - **トレイトで抽象化**: ハンドラはトレイト経由で呼び出し、テストではモックに差し替える
//! - **1 操作 1 文**: 読み取りは 1 クエリ、書き込みは 1 文 + 明示的なコミット
//! - **部分更新**: SET 句はドメイン層の [`Assignment`] から組み立てる。
//!   カラム名は許可リスト由来の静的文字列のみで、値はすべてバインドする

pub mod application_repository;
pub mod employee_repository;
pub mod group_repository;
pub mod task_repository;

pub use application_repository::{ApplicationRepository, PostgresApplicationRepository};
pub use employee_repository::{EmployeeRepository, PostgresEmployeeRepository};
pub use group_repository::{GroupRepository, PostgresGroupRepository};
use sqlx::{Postgres, QueryBuilder};
use staffdesk_domain::update::{Assignment, ColumnValue};
pub use task_repository::{PostgresTaskRepository, TaskRepository};

/// `UPDATE {table} SET ... WHERE id = $n` を組み立てる
///
/// `assignments` が空の場合は呼び出し側で文の発行自体を省略すること。
pub(crate) fn build_update<'args>(
    table: &'static str,
    id: i32,
    assignments: &[Assignment],
) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE ");
    builder.push(table).push(" SET ");

    let mut set = builder.separated(", ");
    for assignment in assignments {
        set.push(assignment.column);
        match &assignment.value {
            ColumnValue::Text(value) => {
                set.push_unseparated(" = ")
                    .push_bind_unseparated(value.clone());
            }
            ColumnValue::Integer(value) => {
                set.push_unseparated(" = ").push_bind_unseparated(*value);
            }
            ColumnValue::CurrentTimestamp => {
                set.push_unseparated(" = CURRENT_TIMESTAMP");
            }
        }
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder
}
