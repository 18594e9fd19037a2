//! # Mailer Service ライブラリ
//!
//! 応募者への確認メール送信 API のハンドラと設定を公開する。

pub mod config;
pub mod error;
pub mod handler;

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use handler::{MailerState, gateway, health_check};
use staffdesk_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// ルーターを構築する
pub fn router(state: Arc<MailerState>) -> Router {
    Router::new()
        .route("/", any(gateway))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
