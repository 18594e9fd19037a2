//! # タスク
//!
//! タスクの一覧・登録・部分更新。

use serde::Serialize;
use serde_json::Value;
use staffdesk_domain::{
    group::GroupId,
    task::{NewTask, Task, TaskUpdate},
    validation::{deserialize_schema, parse_schema},
};
use staffdesk_shared::GatewayResponse;

use super::{Created, DepartmentState, Updated};
use crate::error::DepartmentError;

#[derive(Serialize)]
struct TasksResponse {
    tasks: Vec<Task>,
}

/// GET tasks
pub(super) async fn list(
    group_id: Option<GroupId>,
    state: &DepartmentState,
) -> Result<GatewayResponse, DepartmentError> {
    let tasks = state.tasks.find_all(group_id).await?;

    Ok(GatewayResponse::json(200, &TasksResponse { tasks }))
}

/// POST tasks
pub(super) async fn create(
    body: Value,
    state: &DepartmentState,
) -> Result<GatewayResponse, DepartmentError> {
    let task: NewTask = parse_schema(body)?;
    let id = state.tasks.insert(&task).await?;
    tracing::info!(%id, "タスクを登録しました");

    Ok(GatewayResponse::json(200, &Created::new(id)))
}

/// PUT tasks
///
/// `status` が `completed` なら同じ UPDATE で `completed_at` も打刻する。
pub(super) async fn update(
    body: Value,
    state: &DepartmentState,
) -> Result<GatewayResponse, DepartmentError> {
    let update: TaskUpdate = deserialize_schema(body)?;
    // 0 以下の id は指定なしと同じ扱い
    let Some(id) = update.id.filter(|id| id.as_i32() > 0) else {
        return Err(DepartmentError::InvalidRequest);
    };

    let assignments = update.assignments();
    if assignments.is_empty() {
        tracing::debug!(%id, "更新対象のフィールドなし");
    } else {
        state.tasks.update(id, &assignments).await?;
        tracing::info!(%id, completed = update.completes(), "タスクを更新しました");
    }

    Ok(GatewayResponse::json(200, &Updated::new()))
}
