//! # 社員
//!
//! 社員の一覧・登録・部分更新。

use serde::Serialize;
use serde_json::Value;
use staffdesk_domain::{
    employee::{Employee, EmployeeUpdate, NewEmployee},
    group::GroupId,
    validation::{deserialize_schema, parse_schema},
};
use staffdesk_shared::GatewayResponse;

use super::{Created, DepartmentState, Updated};
use crate::error::DepartmentError;

#[derive(Serialize)]
struct EmployeesResponse {
    employees: Vec<Employee>,
}

/// GET employees
pub(super) async fn list(
    group_id: Option<GroupId>,
    state: &DepartmentState,
) -> Result<GatewayResponse, DepartmentError> {
    let employees = state.employees.find_all(group_id).await?;

    Ok(GatewayResponse::json(200, &EmployeesResponse { employees }))
}

/// POST employees
pub(super) async fn create(
    body: Value,
    state: &DepartmentState,
) -> Result<GatewayResponse, DepartmentError> {
    let employee: NewEmployee = parse_schema(body)?;
    let id = state.employees.insert(&employee).await?;
    tracing::info!(%id, "社員を登録しました");

    Ok(GatewayResponse::json(200, &Created::new(id)))
}

/// PUT employees
///
/// 更新対象のフィールドが 1 つもなければ何も書き込まずに成功を返す。
pub(super) async fn update(
    body: Value,
    state: &DepartmentState,
) -> Result<GatewayResponse, DepartmentError> {
    let update: EmployeeUpdate = deserialize_schema(body)?;
    // 0 以下の id は指定なしと同じ扱い
    let Some(id) = update.id.filter(|id| id.as_i32() > 0) else {
        return Err(DepartmentError::InvalidRequest);
    };

    let assignments = update.assignments();
    if assignments.is_empty() {
        tracing::debug!(%id, "更新対象のフィールドなし");
    } else {
        state.employees.update(id, &assignments).await?;
        tracing::info!(%id, columns = assignments.len(), "社員を更新しました");
    }

    Ok(GatewayResponse::json(200, &Updated::new()))
}
