use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRow};

/// Persists an analysed résumé and returns the stored row.
pub async fn save_resume(pool: &PgPool, resume: &NewResume) -> Result<ResumeRow, AppError> {
    let score = i32::try_from(resume.score)
        .map_err(|_| AppError::Validation(format!("score {} out of range", resume.score)))?;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, filename, filepath, job_title, score, feedback)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&resume.filename)
    .bind(&resume.filepath)
    .bind(&resume.job_title)
    .bind(score)
    .bind(&resume.feedback)
    .fetch_one(pool)
    .await?;

    info!("Saved resume {} ({}) with score {}", row.id, row.filename, row.score);
    Ok(row)
}

/// Loads a stored résumé by id.
pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}
