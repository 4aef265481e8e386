use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::models::title::MatchResult;
use crate::scoring::BaseScorer;
use crate::titles::normalizer::TitleNormalizer;
use crate::titles::recorder::UnverifiedTitleRecorder;
use crate::titles::repository::TitleRepository;

/// Multiplier applied to the base score when the job title is not in the taxonomy.
pub const UNAPPROVED_TITLE_PENALTY: f64 = 0.8;

/// Scores a résumé against a job title: normalize, check approval, record unknown
/// titles, then apply the penalty to the injected base score.
pub struct JobTitleMatcher {
    normalizer: TitleNormalizer,
    recorder: UnverifiedTitleRecorder,
    base_scorer: Arc<dyn BaseScorer>,
}

impl JobTitleMatcher {
    pub fn new(repo: Arc<dyn TitleRepository>, base_scorer: Arc<dyn BaseScorer>) -> Self {
        Self {
            normalizer: TitleNormalizer::new(repo.clone()),
            recorder: UnverifiedTitleRecorder::new(repo),
            base_scorer,
        }
    }

    /// An unknown title is an expected outcome, not an error. Only persistence
    /// failures are returned, including a failure to record the unverified title.
    pub async fn analyse(&self, cv_text: &str, job_title: &str) -> Result<MatchResult, AppError> {
        let canonical = self.normalizer.normalize(job_title).await?;
        let approved = self.normalizer.is_approved(&canonical).await?;

        if !approved {
            self.recorder.record_if_unseen(job_title, &canonical).await?;
        }

        let base = self.base_scorer.base_score(cv_text);
        let score = final_score(base, approved);

        info!(
            job_title,
            canonical = %canonical,
            approved,
            base,
            score,
            "analysed résumé against job title"
        );

        Ok(MatchResult {
            score,
            is_approved_job: approved,
            original_job_title: job_title.to_string(),
            job_title_used: canonical,
        })
    }
}

/// `round(base)` for approved titles, `round(base * 0.8)` otherwise. Base is clamped to [0, 100].
pub fn final_score(base: f64, approved: bool) -> u32 {
    let base = if base.is_nan() { 0.0 } else { base.clamp(0.0, 100.0) };
    let adjusted = if approved {
        base
    } else {
        base * UNAPPROVED_TITLE_PENALTY
    };
    adjusted.round() as u32
}
