//! Caller-side composition: résumé text in, match result plus content feedback out.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::title::MatchResult;
use crate::scoring::content::{ContentAssessment, ContentScorer};
use crate::scoring::title_match::{title_alignment, TitleAlignment};
use crate::titles::matcher::JobTitleMatcher;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub result: MatchResult,
    pub title_alignment: TitleAlignment,
    pub feedback: ContentAssessment,
}

/// Runs the title matcher and attaches title alignment, the content breakdown and
/// suggestions. Title suggestions lead: approval first, then alignment.
pub async fn analyse_resume(
    matcher: &JobTitleMatcher,
    content: &ContentScorer,
    cv_text: &str,
    job_title: &str,
) -> Result<AnalysisReport, AppError> {
    let result = matcher.analyse(cv_text, job_title).await?;
    let alignment = title_alignment(cv_text, &result.job_title_used);

    let mut feedback = content.assess(cv_text);
    if let Some(suggestion) = alignment.suggestion(&result.job_title_used) {
        feedback.suggestions.insert(0, suggestion);
    }
    if let Some(suggestion) = title_suggestion(&result) {
        feedback.suggestions.insert(0, suggestion);
    }

    Ok(AnalysisReport {
        result,
        title_alignment: alignment,
        feedback,
    })
}

fn title_suggestion(result: &MatchResult) -> Option<String> {
    if result.is_approved_job {
        return None;
    }
    Some(format!(
        "'{}' is not a recognised job title yet, so the score carries a 20% penalty. \
         It has been queued for review; a standard title such as '{}' may score higher.",
        result.original_job_title, result.job_title_used
    ))
}
