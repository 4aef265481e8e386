use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::extraction::DocumentKind;

/// Longest job title accepted from a user.
pub const MAX_JOB_TITLE_CHARS: usize = 255;

/// A résumé file plus the job title it should be scored against.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub path: PathBuf,
    pub job_title: String,
}

impl ResumeUpload {
    pub fn new(path: impl Into<PathBuf>, job_title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            job_title: job_title.into(),
        }
    }

    /// Request-level checks: title present and short enough, file present, accepted
    /// type, within `max_bytes`. Returns the detected document kind.
    pub fn validate(&self, max_bytes: u64) -> Result<DocumentKind, AppError> {
        validate_job_title(&self.job_title)?;

        let metadata = std::fs::metadata(&self.path).map_err(|_| {
            AppError::NotFound(format!("resume file '{}' not found", self.path.display()))
        })?;
        if !metadata.is_file() {
            return Err(AppError::Validation(format!(
                "'{}' is not a file",
                self.path.display()
            )));
        }

        let kind = DocumentKind::from_path(&self.path)?;

        if metadata.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "resume is {} bytes; the limit is {max_bytes} bytes",
                metadata.len()
            )));
        }

        Ok(kind)
    }

    pub fn filename(&self) -> String {
        file_name(&self.path)
    }
}

pub fn validate_job_title(job_title: &str) -> Result<(), AppError> {
    if job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title is required".to_string()));
    }
    if job_title.chars().count() > MAX_JOB_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "job_title must be at most {MAX_JOB_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
