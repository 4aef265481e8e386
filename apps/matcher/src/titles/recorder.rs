use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::titles::repository::TitleRepository;

/// Queues unrecognised titles for curation, once per distinct original title.
pub struct UnverifiedTitleRecorder {
    repo: Arc<dyn TitleRepository>,
}

impl UnverifiedTitleRecorder {
    pub fn new(repo: Arc<dyn TitleRepository>) -> Self {
        Self { repo }
    }

    /// Stores `(original, suggested)` unless `original` was already recorded.
    /// The first suggestion is kept; later calls are no-ops. Returns `true` if a row was created.
    pub async fn record_if_unseen(&self, original: &str, suggested: &str) -> Result<bool, AppError> {
        let created = self.repo.insert_if_absent(original, suggested).await?;
        if created {
            info!(original, suggested, "recorded unverified job title");
        } else {
            debug!(original, "unverified job title already recorded");
        }
        Ok(created)
    }
}
