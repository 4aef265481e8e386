use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::title::{NewStandardisedTitle, StandardisedTitleRow, UnverifiedTitleRow};
use crate::titles::like::like_regex;
use crate::titles::repository::{CurationRepository, TitleRepository};

/// In-process title store for tests. Rows are kept in id order.
#[derive(Default)]
pub struct InMemoryTitleRepository {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    titles: Vec<StandardisedTitleRow>,
    unverified: Vec<UnverifiedTitleRow>,
}

impl Tables {
    fn upsert(&mut self, title: &NewStandardisedTitle) {
        let now = Utc::now();
        if let Some(existing) = self
            .titles
            .iter_mut()
            .find(|t| t.original_code == title.original_code)
        {
            existing.original_title = title.original_title.clone();
            existing.standardised_title = title.standardised_title.clone();
            existing.is_approved = existing.is_approved || title.is_approved;
            existing.updated_at = now;
            return;
        }

        let id = self.titles.last().map(|t| t.id + 1).unwrap_or(1);
        self.titles.push(StandardisedTitleRow {
            id,
            original_code: title.original_code.clone(),
            original_title: title.original_title.clone(),
            standardised_title: title.standardised_title.clone(),
            is_approved: title.is_approved,
            created_at: now,
            updated_at: now,
        });
    }
}

impl InMemoryTitleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with taxonomy rows, ids assigned in order.
    pub fn seeded<I>(titles: I) -> Self
    where
        I: IntoIterator<Item = NewStandardisedTitle>,
    {
        let mut tables = Tables::default();
        for title in titles {
            tables.upsert(&title);
        }
        Self {
            inner: RwLock::new(tables),
        }
    }

    pub async fn unverified_count(&self) -> usize {
        self.inner.read().await.unverified.len()
    }
}

#[async_trait]
impl TitleRepository for InMemoryTitleRepository {
    async fn find_by_pattern(
        &self,
        pattern: &str,
    ) -> Result<Option<StandardisedTitleRow>, AppError> {
        let matcher = like_regex(pattern);
        let tables = self.inner.read().await;
        Ok(tables
            .titles
            .iter()
            .find(|t| matcher.is_match(&t.standardised_title) || matcher.is_match(&t.original_title))
            .cloned())
    }

    async fn exists_exact(&self, standardised_title: &str) -> Result<bool, AppError> {
        let tables = self.inner.read().await;
        Ok(tables
            .titles
            .iter()
            .any(|t| t.standardised_title == standardised_title))
    }

    async fn insert_if_absent(
        &self,
        original_title: &str,
        suggested_standardised_title: &str,
    ) -> Result<bool, AppError> {
        // Check and insert happen under one write guard.
        let mut tables = self.inner.write().await;
        if tables
            .unverified
            .iter()
            .any(|u| u.original_title == original_title)
        {
            return Ok(false);
        }

        let id = tables.unverified.last().map(|u| u.id + 1).unwrap_or(1);
        tables.unverified.push(UnverifiedTitleRow {
            id,
            original_title: original_title.to_string(),
            suggested_standardised_title: suggested_standardised_title.to_string(),
            created_at: Utc::now(),
        });
        Ok(true)
    }
}

#[async_trait]
impl CurationRepository for InMemoryTitleRepository {
    async fn upsert_standardised(&self, title: &NewStandardisedTitle) -> Result<(), AppError> {
        self.inner.write().await.upsert(title);
        Ok(())
    }

    async fn list_approved(&self, limit: i64) -> Result<Vec<StandardisedTitleRow>, AppError> {
        let tables = self.inner.read().await;
        Ok(tables
            .titles
            .iter()
            .filter(|t| t.is_approved)
            .take(clamp_limit(limit))
            .cloned()
            .collect())
    }

    async fn list_needing_review(
        &self,
        limit: i64,
    ) -> Result<Vec<StandardisedTitleRow>, AppError> {
        let tables = self.inner.read().await;
        Ok(tables
            .titles
            .iter()
            .filter(|t| !t.is_approved)
            .take(clamp_limit(limit))
            .cloned()
            .collect())
    }

    async fn list_unverified(&self, limit: i64) -> Result<Vec<UnverifiedTitleRow>, AppError> {
        let tables = self.inner.read().await;
        Ok(tables
            .unverified
            .iter()
            .take(clamp_limit(limit))
            .cloned()
            .collect())
    }
}

fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, original: &str, standardised: &str, approved: bool) -> NewStandardisedTitle {
        NewStandardisedTitle {
            original_code: code.to_string(),
            original_title: original.to_string(),
            standardised_title: standardised.to_string(),
            is_approved: approved,
        }
    }

    #[tokio::test]
    async fn test_find_by_pattern_checks_both_fields_lowest_id_first() {
        let repo = InMemoryTitleRepository::seeded(vec![
            entry("11-1011.00", "Chief Executives", "Chief Executive", true),
            entry("11-1021.00", "General and Operations Managers", "General & Operations Manager", true),
            entry("11-9999.00", "chief executive", "Chief Exec (dup)", false),
        ]);

        let by_label = repo
            .find_by_pattern("general and operations managers")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_label.standardised_title, "General & Operations Manager");

        let by_canonical = repo.find_by_pattern("CHIEF EXECUTIVE").await.unwrap().unwrap();
        assert_eq!(by_canonical.id, 1);

        assert!(repo.find_by_pattern("Astronaut").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_exact_is_case_sensitive() {
        let repo = InMemoryTitleRepository::seeded(vec![entry("1", "Managers", "Manager", false)]);
        assert!(repo.exists_exact("Manager").await.unwrap());
        assert!(!repo.exists_exact("manager").await.unwrap());
        assert!(!repo.exists_exact("Manager ").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_first_suggestion() {
        let repo = InMemoryTitleRepository::new();
        assert!(repo.insert_if_absent("Ninjas", "Ninja").await.unwrap());
        assert!(!repo.insert_if_absent("Ninjas", "Ninjas").await.unwrap());

        let rows = repo.list_unverified(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].suggested_standardised_title, "Ninja");
    }

    #[tokio::test]
    async fn test_upsert_updates_by_code_and_never_revokes_approval() {
        let repo = InMemoryTitleRepository::seeded(vec![entry("1", "Cooks", "Cook", true)]);
        repo.upsert_standardised(&entry("1", "Cooks, Restaurant", "Cook, Restaurant", false))
            .await
            .unwrap();
        repo.upsert_standardised(&entry("2", "Bakers", "Baker", false))
            .await
            .unwrap();

        let approved = repo.list_approved(10).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].standardised_title, "Cook, Restaurant");

        let pending = repo.list_needing_review(10).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 2);
    }

    #[tokio::test]
    async fn test_negative_limit_lists_nothing() {
        let repo = InMemoryTitleRepository::seeded(vec![entry("1", "Cooks", "Cook", true)]);
        assert!(repo.list_approved(-1).await.unwrap().is_empty());
    }
}
