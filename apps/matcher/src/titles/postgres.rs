use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::title::{NewStandardisedTitle, StandardisedTitleRow, UnverifiedTitleRow};
use crate::titles::repository::{CurationRepository, TitleRepository};

/// PostgreSQL-backed title store over `standardised_job_titles` and `unverified_job_titles`.
#[derive(Clone)]
pub struct PgTitleRepository {
    pool: PgPool,
}

impl PgTitleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TitleRepository for PgTitleRepository {
    async fn find_by_pattern(
        &self,
        pattern: &str,
    ) -> Result<Option<StandardisedTitleRow>, AppError> {
        Ok(sqlx::query_as::<_, StandardisedTitleRow>(
            r#"
            SELECT *
            FROM standardised_job_titles
            WHERE standardised_title ILIKE $1 OR original_title ILIKE $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(pattern)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn exists_exact(&self, standardised_title: &str) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM standardised_job_titles WHERE standardised_title = $1)",
        )
        .bind(standardised_title)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn insert_if_absent(
        &self,
        original_title: &str,
        suggested_standardised_title: &str,
    ) -> Result<bool, AppError> {
        // Single statement; the UNIQUE constraint settles concurrent submissions.
        let result = sqlx::query(
            r#"
            INSERT INTO unverified_job_titles (original_title, suggested_standardised_title)
            VALUES ($1, $2)
            ON CONFLICT (original_title) DO NOTHING
            "#,
        )
        .bind(original_title)
        .bind(suggested_standardised_title)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl CurationRepository for PgTitleRepository {
    async fn upsert_standardised(&self, title: &NewStandardisedTitle) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO standardised_job_titles
                (original_code, original_title, standardised_title, is_approved)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (original_code) DO UPDATE SET
                original_title = EXCLUDED.original_title,
                standardised_title = EXCLUDED.standardised_title,
                is_approved = standardised_job_titles.is_approved OR EXCLUDED.is_approved,
                updated_at = NOW()
            "#,
        )
        .bind(&title.original_code)
        .bind(&title.original_title)
        .bind(&title.standardised_title)
        .bind(title.is_approved)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_approved(&self, limit: i64) -> Result<Vec<StandardisedTitleRow>, AppError> {
        Ok(sqlx::query_as::<_, StandardisedTitleRow>(
            "SELECT * FROM standardised_job_titles WHERE is_approved = TRUE ORDER BY id ASC LIMIT $1",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_needing_review(
        &self,
        limit: i64,
    ) -> Result<Vec<StandardisedTitleRow>, AppError> {
        Ok(sqlx::query_as::<_, StandardisedTitleRow>(
            "SELECT * FROM standardised_job_titles WHERE is_approved = FALSE ORDER BY id ASC LIMIT $1",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_unverified(&self, limit: i64) -> Result<Vec<UnverifiedTitleRow>, AppError> {
        Ok(sqlx::query_as::<_, UnverifiedTitleRow>(
            "SELECT * FROM unverified_job_titles ORDER BY created_at ASC, id ASC LIMIT $1",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?)
    }
}
