//! # グループ
//!
//! グループ一覧を社員数・タスク数付きで返す。

use serde::Serialize;
use staffdesk_domain::group::GroupSummary;
use staffdesk_shared::GatewayResponse;

use super::DepartmentState;
use crate::error::DepartmentError;

#[derive(Serialize)]
struct GroupsResponse {
    groups: Vec<GroupSummary>,
}

/// GET groups
pub(super) async fn list(state: &DepartmentState) -> Result<GatewayResponse, DepartmentError> {
    let groups = state.groups.find_all_with_counts().await?;
    tracing::debug!(count = groups.len(), "グループ一覧を取得");

    Ok(GatewayResponse::json(200, &GroupsResponse { groups }))
}
