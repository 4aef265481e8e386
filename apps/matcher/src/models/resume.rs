use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub filename: String,
    pub filepath: String,
    pub job_title: String,
    pub score: i32,
    pub feedback: Value,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when persisting an analysed résumé.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub filename: String,
    pub filepath: String,
    pub job_title: String,
    pub score: u32,
    pub feedback: Value,
}
