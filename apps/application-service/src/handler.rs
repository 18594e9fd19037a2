//! # 応募受付ハンドラ
//!
//! 応募を検証して applications テーブルに保存し、続けて確認メールを送る。
//!
//! 保存が成功すればレスポンスは常に 200。確認メールの成否は
//! `email_sent` と `message` にだけ反映され、保存済みの行は取り消さない。

mod health;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{Method, Response},
};
pub use health::health_check;
use serde::Serialize;
use serde_json::Value;
use staffdesk_domain::{
    application::{Application, ApplicationId},
    notification::NotificationError,
};
use staffdesk_infra::{notification::ConfirmationMailer, repository::ApplicationRepository};
use staffdesk_shared::{CorsPolicy, GatewayEvent, GatewayResponse};
use tracing::Instrument as _;

use crate::error::ApplicationError;

/// プリフライト許可内容
pub const CORS_POLICY: CorsPolicy = CorsPolicy {
    allow_methods: "POST, OPTIONS",
    allow_headers: "Content-Type, X-User-Id",
};

/// 応募受付 API の共有状態
pub struct ApplicationState {
    pub applications: Arc<dyn ApplicationRepository>,
    pub mailer:       ConfirmationMailer,
}

/// 確認メール送信の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmailOutcome {
    Sent,
    NotConfigured,
    Failed,
}

impl EmailOutcome {
    fn message(self) -> &'static str {
        match self {
            Self::Sent => "Application saved successfully. Email sent",
            Self::NotConfigured => {
                "Application saved successfully. Email not sent (SMTP not configured)"
            }
            Self::Failed => "Application saved successfully. Email not sent (delivery failed)",
        }
    }
}

#[derive(Serialize)]
struct SubmittedResponse {
    success:        bool,
    application_id: ApplicationId,
    email_sent:     bool,
    message:        &'static str,
}

/// ゲートウェイイベントを処理する
///
/// メソッド未指定は POST として扱う。
pub async fn handle(event: GatewayEvent, state: &ApplicationState) -> GatewayResponse {
    let method = event.method_or("POST");
    let span = tracing::info_span!("submit_application", %method);

    async move {
        if method == "OPTIONS" {
            return GatewayResponse::preflight(&CORS_POLICY);
        }

        match submit(&method, &event, state).await {
            Ok(response) => response,
            Err(e) => e.into(),
        }
    }
    .instrument(span)
    .await
}

async fn submit(
    method: &str,
    event: &GatewayEvent,
    state: &ApplicationState,
) -> Result<GatewayResponse, ApplicationError> {
    if method != "POST" {
        return Err(ApplicationError::MethodNotAllowed);
    }

    let body: Value = serde_json::from_str(event.body_or_empty_object())?;
    let application = Application::from_body(body)?;

    let application_id = state.applications.insert(&application).await?;
    tracing::info!(
        %application_id,
        application_type = %application.application_type(),
        "応募を保存しました"
    );

    let outcome = send_confirmation(&application, &state.mailer).await;

    let response = SubmittedResponse {
        success: true,
        application_id,
        email_sent: outcome == EmailOutcome::Sent,
        message: outcome.message(),
    };
    Ok(GatewayResponse::json(200, &response).not_base64())
}

/// 確認メールを送る（失敗しても応募の保存は取り消さない）
async fn send_confirmation(application: &Application, mailer: &ConfirmationMailer) -> EmailOutcome {
    match mailer.send(&application.confirmation()).await {
        Ok(()) => EmailOutcome::Sent,
        Err(NotificationError::NotConfigured) => {
            tracing::warn!("SMTP 設定がないため確認メールを送りませんでした");
            EmailOutcome::NotConfigured
        }
        Err(e) => {
            tracing::warn!(error = %e, "確認メールの送信に失敗しました");
            EmailOutcome::Failed
        }
    }
}

/// axum からの入口
pub async fn gateway(
    State(state): State<Arc<ApplicationState>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response<String> {
    let event = GatewayEvent::from_http_parts(&method, query, body);
    handle(event, &state).await.into_http()
}

#[cfg(test)]
mod tests;
