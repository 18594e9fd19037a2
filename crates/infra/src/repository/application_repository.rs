//! # ApplicationRepository
//!
//! 応募（社会人応募者・学生）の保存を担当する。
//! 応募は 1 回の INSERT で丸ごと書き込まれ、更新されることはない。

use async_trait::async_trait;
use sqlx::PgPool;
use staffdesk_domain::application::{Application, ApplicationId};

use crate::error::InfraError;

/// 応募リポジトリトレイト
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// 応募を保存し、採番された ID を返す
    async fn insert(&self, application: &Application) -> Result<ApplicationId, InfraError>;
}

/// PostgreSQL 実装の ApplicationRepository
#[derive(Debug, Clone)]
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(application_type = %application.application_type())
    )]
    async fn insert(&self, application: &Application) -> Result<ApplicationId, InfraError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = match application {
            Application::Applicant(form) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO applications
                        (application_type, name, surname, email, phone,
                         position, experience, cover_letter, portfolio_url)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    RETURNING id
                    "#,
                )
                .bind(application.application_type().as_str())
                .bind(&form.name)
                .bind(&form.surname)
                .bind(&form.email)
                .bind(&form.phone)
                .bind(&form.position)
                .bind(form.experience)
                .bind(&form.cover_letter)
                .bind(&form.portfolio_url)
                .fetch_one(&mut *tx)
                .await?
            }
            Application::Student(form) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO applications
                        (application_type, name, surname, email, phone,
                         university, course, specialty, direction, motivation_letter, portfolio_url)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    RETURNING id
                    "#,
                )
                .bind(application.application_type().as_str())
                .bind(&form.name)
                .bind(&form.surname)
                .bind(&form.email)
                .bind(&form.phone)
                .bind(&form.university)
                .bind(form.course)
                .bind(&form.specialty)
                .bind(&form.direction)
                .bind(&form.motivation_letter)
                .bind(&form.portfolio_url)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(ApplicationId::from_i32(id))
    }
}
