//! # 部署 API ハンドラ
//!
//! `resource` クエリ（groups / employees / tasks）と HTTP メソッドの組み合わせで
//! 処理を振り分ける。
//!
//! | メソッド | groups | employees | tasks |
//! |----------|--------|-----------|-------|
//! | GET | 集計付き一覧 | 一覧（`group_id` で絞り込み可） | 一覧（`group_id` で絞り込み可） |
//! | POST | - | 登録 | 登録 |
//! | PUT | - | 部分更新 | 部分更新（完了時に `completed_at` を打刻） |
//! | OPTIONS | プリフライト | プリフライト | プリフライト |
//!
//! それ以外の組み合わせは 400 `Invalid request`。
//!
//! ## 構成
//!
//! - [`handle`]: ゲートウェイイベントを受けてレスポンスを返す本体
//! - [`gateway`]: axum からの入口。HTTP リクエストをイベントに変換して [`handle`] に渡す

mod employees;
mod groups;
mod health;
mod tasks;

use std::{collections::HashMap, str::FromStr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{Method, Response},
};
pub use health::health_check;
use serde::Serialize;
use serde_json::Value;
use staffdesk_domain::group::GroupId;
use staffdesk_infra::repository::{EmployeeRepository, GroupRepository, TaskRepository};
use staffdesk_shared::{CorsPolicy, GatewayEvent, GatewayResponse};
use tracing::Instrument as _;

use crate::error::DepartmentError;

/// 部署 API のプリフライト許可内容
pub const CORS_POLICY: CorsPolicy = CorsPolicy {
    allow_methods: "GET, POST, PUT, DELETE, OPTIONS",
    allow_headers: "Content-Type",
};

/// 部署 API の共有状態
pub struct DepartmentState {
    pub groups:    Arc<dyn GroupRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub tasks:     Arc<dyn TaskRepository>,
}

/// POST の成功レスポンス `{ "success": true, "id": N }`
#[derive(Serialize)]
struct Created<Id> {
    success: bool,
    id:      Id,
}

impl<Id> Created<Id> {
    fn new(id: Id) -> Self {
        Self { success: true, id }
    }
}

/// PUT の成功レスポンス `{ "success": true }`
#[derive(Serialize)]
struct Updated {
    success: bool,
}

impl Updated {
    fn new() -> Self {
        Self { success: true }
    }
}

/// 操作対象のリソース
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
enum Resource {
    Groups,
    Employees,
    Tasks,
}

/// ゲートウェイイベントを処理する
///
/// メソッド未指定は GET、`resource` 未指定は groups として扱う。
pub async fn handle(event: GatewayEvent, state: &DepartmentState) -> GatewayResponse {
    let method = event.method_or("GET");
    let resource = event.query("resource").unwrap_or("groups").to_string();
    let span = tracing::info_span!("department", %method, %resource);

    async move {
        if method == "OPTIONS" {
            return GatewayResponse::preflight(&CORS_POLICY);
        }

        let resource = Resource::from_str(&resource).ok();
        match dispatch(&method, resource, &event, state).await {
            Ok(response) => response,
            Err(e) => e.into(),
        }
    }
    .instrument(span)
    .await
}

async fn dispatch(
    method: &str,
    resource: Option<Resource>,
    event: &GatewayEvent,
    state: &DepartmentState,
) -> Result<GatewayResponse, DepartmentError> {
    match (method, resource) {
        ("GET", Some(Resource::Groups)) => groups::list(state).await,
        ("GET", Some(Resource::Employees)) => {
            employees::list(group_filter(event)?, state).await
        }
        ("GET", Some(Resource::Tasks)) => tasks::list(group_filter(event)?, state).await,
        ("POST", Some(Resource::Employees)) => employees::create(parse_body(event)?, state).await,
        ("POST", Some(Resource::Tasks)) => tasks::create(parse_body(event)?, state).await,
        ("PUT", Some(Resource::Employees)) => employees::update(parse_body(event)?, state).await,
        ("PUT", Some(Resource::Tasks)) => tasks::update(parse_body(event)?, state).await,
        _ => Err(DepartmentError::InvalidRequest),
    }
}

/// `group_id` クエリを読む（空文字は絞り込みなし）
fn group_filter(event: &GatewayEvent) -> Result<Option<GroupId>, DepartmentError> {
    match event.query("group_id") {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map(|id| Some(GroupId::from_i32(id)))
            .map_err(|_| DepartmentError::InvalidGroupId(raw.to_string())),
    }
}

/// ボディを JSON として読む（空なら `{}`）
fn parse_body(event: &GatewayEvent) -> Result<Value, DepartmentError> {
    Ok(serde_json::from_str(event.body_or_empty_object())?)
}

/// axum からの入口
///
/// パス `/` への任意のメソッドを受け付け、ゲートウェイイベントに変換する。
pub async fn gateway(
    State(state): State<Arc<DepartmentState>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response<String> {
    let event = GatewayEvent::from_http_parts(&method, query, body);
    handle(event, &state).await.into_http()
}
