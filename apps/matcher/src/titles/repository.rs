use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::title::{NewStandardisedTitle, StandardisedTitleRow, UnverifiedTitleRow};

/// Persistence capabilities the resolver needs.
///
/// Carried as `Arc<dyn TitleRepository>` so the Postgres store can be swapped for the
/// in-memory one in tests.
#[async_trait]
pub trait TitleRepository: Send + Sync {
    /// First taxonomy row (lowest id) whose `standardised_title` or `original_title`
    /// matches `pattern` under case-insensitive LIKE semantics, with `\` as escape.
    /// Approval state is not considered.
    async fn find_by_pattern(
        &self,
        pattern: &str,
    ) -> Result<Option<StandardisedTitleRow>, AppError>;

    /// Whether any taxonomy row has exactly this `standardised_title` (case-sensitive).
    async fn exists_exact(&self, standardised_title: &str) -> Result<bool, AppError>;

    /// Inserts an unverified title unless a row with the same `original_title` exists.
    /// Must be a single atomic operation. Returns `true` when a row was created.
    async fn insert_if_absent(
        &self,
        original_title: &str,
        suggested_standardised_title: &str,
    ) -> Result<bool, AppError>;
}

/// Curation-side operations: taxonomy import and the review scopes.
#[async_trait]
pub trait CurationRepository: Send + Sync {
    /// Upserts by `original_code`. An existing approval is never revoked by an import.
    async fn upsert_standardised(&self, title: &NewStandardisedTitle) -> Result<(), AppError>;

    async fn list_approved(&self, limit: i64) -> Result<Vec<StandardisedTitleRow>, AppError>;

    async fn list_needing_review(&self, limit: i64)
        -> Result<Vec<StandardisedTitleRow>, AppError>;

    /// Unverified titles, oldest first.
    async fn list_unverified(&self, limit: i64) -> Result<Vec<UnverifiedTitleRow>, AppError>;
}
