use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the taxonomy, unverified-title and résumé tables (idempotent).
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS standardised_job_titles (
            id BIGSERIAL PRIMARY KEY,
            original_code VARCHAR(20) NOT NULL UNIQUE,
            original_title TEXT NOT NULL,
            standardised_title TEXT NOT NULL,
            is_approved BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_standardised_job_titles_title ON standardised_job_titles(standardised_title)",
    )
    .execute(pool)
    .await?;

    // Uniqueness on original_title is what makes recording a single atomic statement.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS unverified_job_titles (
            id BIGSERIAL PRIMARY KEY,
            original_title TEXT NOT NULL UNIQUE,
            suggested_standardised_title TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id UUID PRIMARY KEY,
            filename TEXT NOT NULL,
            filepath TEXT NOT NULL,
            job_title TEXT NOT NULL,
            score INTEGER NOT NULL,
            feedback JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database migrations applied");
    Ok(())
}
