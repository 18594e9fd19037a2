//! # Mailer Service サーバー
//!
//! 応募者に「анкета получена」の確認メールを送る API。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3002`） |
//! | `SMTP_HOST` | No | SMTP リレーのホスト |
//! | `SMTP_PORT` | No | SMTP リレーのポート（デフォルト: `587`） |
//! | `SMTP_USER` | No | ログインユーザー兼送信元アドレス |
//! | `SMTP_PASSWORD` | No | ログインパスワード |
//!
//! SMTP_HOST / SMTP_USER / SMTP_PASSWORD のいずれかが欠けていると、
//! 送信要求には 500 `SMTP configuration missing` を返す。

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use staffdesk_infra::notification::ConfirmationMailer;
use staffdesk_mailer_service::{config::MailerConfig, handler::MailerState, router};
use staffdesk_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("mailer-service"));
    let _tracing_guard = tracing::info_span!("app", service = "mailer-service").entered();

    // 設定読み込み
    let config = MailerConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Mailer Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );
    if config.smtp.is_none() {
        tracing::warn!("SMTP 設定がありません。送信要求はすべて失敗します");
    }

    let mailer = ConfirmationMailer::from_config(config.smtp.as_ref())
        .context("確認メール送信の初期化に失敗しました")?;
    let state = Arc::new(MailerState { mailer });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Mailer Service サーバーが起動しました: {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
