//! # Department Service サーバー
//!
//! グループ・社員・タスクを扱う部署 API。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3001`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,staffdesk=debug`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p staffdesk-department-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use staffdesk_department_service::{config::DepartmentConfig, handler::DepartmentState, router};
use staffdesk_infra::{
    db,
    repository::{PostgresEmployeeRepository, PostgresGroupRepository, PostgresTaskRepository},
};
use staffdesk_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("department-service"));
    let _tracing_guard = tracing::info_span!("app", service = "department-service").entered();

    // 設定読み込み
    let config = DepartmentConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Department Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let state = Arc::new(DepartmentState {
        groups:    Arc::new(PostgresGroupRepository::new(pool.clone())),
        employees: Arc::new(PostgresEmployeeRepository::new(pool.clone())),
        tasks:     Arc::new(PostgresTaskRepository::new(pool)),
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Department Service サーバーが起動しました: {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
