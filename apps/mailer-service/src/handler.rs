//! # 確認メール送信ハンドラ
//!
//! `{ name, surname, email, application_type }` を受け取り、
//! 応募受付の確認メールを 1 通送る。
//!
//! | 状況 | ステータス |
//! |------|-----------|
//! | OPTIONS | 200 プリフライト |
//! | POST 以外 | 405 |
//! | ボディが JSON でない | 400 `Invalid JSON body` |
//! | スキーマ違反 | 422 |
//! | SMTP 未設定 | 500 `SMTP configuration missing` |
//! | 送信成功 | 200 `{ success, message }` |

mod health;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{Method, Response},
};
pub use health::health_check;
use serde::Serialize;
use serde_json::Value;
use staffdesk_domain::{application::ConfirmationRequest, validation::parse_schema};
use staffdesk_infra::notification::ConfirmationMailer;
use staffdesk_shared::{CorsPolicy, GatewayEvent, GatewayResponse};
use tracing::Instrument as _;

use crate::error::MailerError;

/// プリフライト許可内容
pub const CORS_POLICY: CorsPolicy = CorsPolicy {
    allow_methods: "POST, OPTIONS",
    allow_headers: "Content-Type, X-User-Id",
};

/// 確認メール送信 API の共有状態
pub struct MailerState {
    pub mailer: ConfirmationMailer,
}

#[derive(Serialize)]
struct SentResponse {
    success: bool,
    message: String,
}

/// ゲートウェイイベントを処理する
///
/// メソッド未指定は POST として扱う。
pub async fn handle(event: GatewayEvent, state: &MailerState) -> GatewayResponse {
    let method = event.method_or("POST");
    let span = tracing::info_span!("send_application_email", %method);

    async move {
        if method == "OPTIONS" {
            return GatewayResponse::preflight(&CORS_POLICY);
        }

        match send(&method, &event, state).await {
            Ok(response) => response,
            Err(e) => e.into(),
        }
    }
    .instrument(span)
    .await
}

async fn send(
    method: &str,
    event: &GatewayEvent,
    state: &MailerState,
) -> Result<GatewayResponse, MailerError> {
    if method != "POST" {
        return Err(MailerError::MethodNotAllowed);
    }

    let body: Value = serde_json::from_str(event.body_or_empty_object())?;
    let request: ConfirmationRequest = parse_schema(body)?;

    state.mailer.send(&request.confirmation()).await?;
    tracing::info!(
        application_type = %request.application_type,
        "確認メールを送信しました"
    );

    let response = SentResponse {
        success: true,
        message: format!("Email sent to {}", request.email),
    };
    Ok(GatewayResponse::json(200, &response).not_base64())
}

/// axum からの入口
///
/// パス `/` への任意のメソッドを受け付け、ゲートウェイイベントに変換する。
pub async fn gateway(
    State(state): State<Arc<MailerState>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response<String> {
    let event = GatewayEvent::from_http_parts(&method, query, body);
    handle(event, &state).await.into_http()
}
