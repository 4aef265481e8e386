use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canonical taxonomy entry, seeded by the import and curated out of band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StandardisedTitleRow {
    pub id: i64,
    pub original_code: String,
    pub original_title: String,
    pub standardised_title: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A raw title that failed the approval check, queued for curation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UnverifiedTitleRow {
    pub id: i64,
    pub original_title: String,
    pub suggested_standardised_title: String,
    pub created_at: DateTime<Utc>,
}

/// Input row for the taxonomy upsert keyed by `original_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStandardisedTitle {
    pub original_code: String,
    pub original_title: String,
    pub standardised_title: String,
    pub is_approved: bool,
}

/// Outcome of matching a résumé against a job title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub is_approved_job: bool,
    pub original_job_title: String,
    pub job_title_used: String,
}
