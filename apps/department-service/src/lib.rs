//! # Department Service ライブラリ
//!
//! 部署 API（グループ・社員・タスク）のハンドラと設定を公開する。
//! テストや別ホストからハンドラを直接呼び出せるよう、ライブラリとしても提供する。

pub mod config;
pub mod error;
pub mod handler;

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use handler::{DepartmentState, gateway, health_check};
use staffdesk_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// ルーターを構築する
///
/// `/` は任意のメソッドをゲートウェイイベントとして受け付け、`/health` はヘルスチェック。
pub fn router(state: Arc<DepartmentState>) -> Router {
    Router::new()
        .route("/", any(gateway))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
