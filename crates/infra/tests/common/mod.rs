//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するシードデータ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use serde_json::{Value, json};
use sqlx::PgPool;
use staffdesk_domain::{
    employee::{EmployeeId, NewEmployee},
    group::GroupId,
    task::{NewTask, TaskId},
};
use staffdesk_infra::repository::{
    EmployeeRepository,
    PostgresEmployeeRepository,
    PostgresTaskRepository,
    TaskRepository,
};

/// グループを直接 INSERT する（API にグループ作成はない）
pub async fn insert_group(pool: &PgPool, name: &str) -> GroupId {
    let id: i32 = sqlx::query_scalar("INSERT INTO groups (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap();
    GroupId::from_i32(id)
}

/// JSON から社員を登録する
pub async fn insert_employee(pool: &PgPool, body: Value) -> EmployeeId {
    let employee: NewEmployee = serde_json::from_value(body).unwrap();
    PostgresEmployeeRepository::new(pool.clone())
        .insert(&employee)
        .await
        .unwrap()
}

/// グループに所属するタスクを登録する
pub async fn insert_task(pool: &PgPool, group_id: Option<GroupId>, title: &str) -> TaskId {
    let task: NewTask =
        serde_json::from_value(json!({ "group_id": group_id, "title": title })).unwrap();
    PostgresTaskRepository::new(pool.clone())
        .insert(&task)
        .await
        .unwrap()
}
