//! DOCX text: paragraph runs from `word/document.xml`, one line per paragraph.

use std::io::{Read, Seek};
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::AppError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the decompressed document part.
const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

/// Text runs, paragraph ends, tabs and line breaks, in document order.
static BODY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:tab/>|<w:br(?:\s[^>]*)?/>|<w:cr/>")
        .expect("docx body token pattern is valid")
});

pub fn extract_text<R: Read + Seek>(reader: R) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| AppError::Extraction(format!("could not open DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| AppError::Extraction(format!("DOCX has no {DOCUMENT_PART}: {e}")))?
        .take(MAX_DOCUMENT_XML_BYTES)
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("could not read {DOCUMENT_PART}: {e}")))?;

    Ok(body_text(&xml))
}

fn body_text(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len() / 8);
    for caps in BODY_TOKEN.captures_iter(xml) {
        match caps.get(1) {
            Some(run) => text.push_str(&unescape_xml(run.as_str())),
            None => match &caps[0] {
                "</w:p>" => text.push('\n'),
                "<w:tab/>" => text.push('\t'),
                _ => text.push('\n'),
            },
        }
    }
    text
}

fn unescape_xml(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
