//! Résumé text extraction. The matcher only ever sees the resulting plain text.

pub mod docx;
pub mod upload;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Accepted résumé formats, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "txt" => Ok(DocumentKind::Text),
            "" => Err(AppError::UnsupportedFormat(
                "file has no extension; upload a PDF, DOCX or TXT file".to_string(),
            )),
            other => Err(AppError::UnsupportedFormat(format!(
                ".{other} is not supported; upload a PDF, DOCX or TXT file"
            ))),
        }
    }
}

/// Produces plain text from an uploaded document.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path, kind: DocumentKind) -> Result<String, AppError>;
}

/// Local-file extractor: PDF through `pdf-extract`, DOCX from its document part,
/// plain text read directly.
pub struct FileTextExtractor;

impl TextExtractor for FileTextExtractor {
    fn extract(&self, path: &Path, kind: DocumentKind) -> Result<String, AppError> {
        let text = match kind {
            DocumentKind::Pdf => {
                let bytes = std::fs::read(path)?;
                if !bytes.starts_with(b"%PDF-") {
                    return Err(AppError::Extraction(
                        "file has a .pdf extension but is not a PDF document".to_string(),
                    ));
                }
                pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                    warn!(path = %path.display(), "PDF parsing failed: {e}");
                    AppError::Extraction(format!("could not read PDF: {e}"))
                })?
            }
            DocumentKind::Text => String::from_utf8_lossy(&std::fs::read(path)?).into_owned(),
            DocumentKind::Docx => docx::extract_text(std::fs::File::open(path)?)?,
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            // Image-only PDFs land here; there is no OCR fallback.
            return Err(AppError::Extraction(
                "Could not extract text from the resume. Image-based PDFs are not supported."
                    .to_string(),
            ));
        }

        debug!(path = %path.display(), chars = text.chars().count(), "extracted résumé text");
        Ok(text)
    }
}
