use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::title::NewStandardisedTitle;
use crate::taxonomy::clean::clean_job_title;
use crate::titles::repository::CurationRepository;

/// Longest `original_code` the taxonomy table accepts.
pub const MAX_CODE_LEN: usize = 20;

/// One occupation from the source taxonomy export.
/// Accepts both the short keys and the O*NET column headers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxonomySourceRow {
    #[serde(alias = "O*NET-SOC Code", alias = "original_code")]
    pub code: String,
    #[serde(alias = "Title", alias = "original_title")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Reads a JSON array of source rows.
pub fn load_source(path: &Path) -> Result<Vec<TaxonomySourceRow>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Cleans every row and upserts it keyed by code. Rows with a blank or oversized code,
/// or a title that cleans to nothing, are skipped.
pub async fn import_titles(
    repo: &dyn CurationRepository,
    rows: &[TaxonomySourceRow],
    approve: bool,
) -> Result<ImportSummary, AppError> {
    let mut summary = ImportSummary::default();

    for row in rows {
        let code = row.code.trim();
        if code.is_empty() || code.len() > MAX_CODE_LEN {
            warn!(code = %row.code, title = %row.title, "skipping taxonomy row with invalid code");
            summary.skipped += 1;
            continue;
        }

        let cleaned = clean_job_title(&row.title);
        if cleaned.cleaned.is_empty() {
            warn!(code, "skipping taxonomy row with empty title");
            summary.skipped += 1;
            continue;
        }
        debug!(code, original = %row.title, cleaned = %cleaned.cleaned, note = %cleaned.note, "cleaned taxonomy title");

        repo.upsert_standardised(&NewStandardisedTitle {
            original_code: code.to_string(),
            original_title: row.title.trim().to_string(),
            standardised_title: cleaned.cleaned,
            is_approved: approve,
        })
        .await?;
        summary.imported += 1;
    }

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        approve,
        "taxonomy import finished"
    );
    Ok(summary)
}
