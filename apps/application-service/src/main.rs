//! # Application Service サーバー
//!
//! 採用ページからの応募（応募者・学生）を保存し、確認メールを送る。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3003`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SMTP_HOST` / `SMTP_PORT` / `SMTP_USER` / `SMTP_PASSWORD` | No | 確認メールの送信設定 |

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use staffdesk_application_service::{config::ApplicationConfig, handler::ApplicationState, router};
use staffdesk_infra::{
    db, notification::ConfirmationMailer, repository::PostgresApplicationRepository,
};
use staffdesk_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("application-service"));
    let _tracing_guard = tracing::info_span!("app", service = "application-service").entered();

    let config = ApplicationConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Application Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;

    let mailer = ConfirmationMailer::from_config(config.smtp.as_ref())
        .context("確認メール送信の初期化に失敗しました")?;
    if !mailer.is_configured() {
        tracing::warn!("SMTP 設定がありません。確認メールは送信されません");
    }

    let state = Arc::new(ApplicationState {
        applications: Arc::new(PostgresApplicationRepository::new(pool)),
        mailer,
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Application Service サーバーが起動しました: {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
