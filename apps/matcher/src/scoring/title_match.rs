//! How closely the résumé text reflects the canonical job title.
//!
//! Reported alongside the content score; it does not feed the base score.

use serde::{Deserialize, Serialize};

/// Ratio assigned when there is no title to compare against.
const EMPTY_TITLE_RATIO: f64 = 0.4;
/// Floor for titles with little or no word overlap.
const WEAK_FLOOR_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    Excellent,
    Good,
    Fair,
    Weak,
}

impl MatchStrength {
    fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.9 {
            MatchStrength::Excellent
        } else if ratio >= 0.7 {
            MatchStrength::Good
        } else if ratio >= 0.5 {
            MatchStrength::Fair
        } else {
            MatchStrength::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAlignment {
    /// 0.0 – 100.0, one decimal place.
    pub title_match_score: f64,
    pub title_match_strength: MatchStrength,
}

impl TitleAlignment {
    /// Leading suggestion for weak or partial alignment, if any.
    pub fn suggestion(&self, canonical: &str) -> Option<String> {
        if self.title_match_score < 30.0 {
            Some(format!(
                "CRITICAL: Your resume shows weak alignment with '{canonical}' positions"
            ))
        } else if self.title_match_score < 60.0 {
            Some(format!(
                "IMPORTANT: Better align your resume with '{canonical}' keywords"
            ))
        } else {
            None
        }
    }
}

/// Scores `cv_text` against `canonical`.
///
/// The whole title appearing in the text is a full match. Otherwise the share of title
/// words found in the text is bucketed: >= 0.9 → 1.0, >= 0.7 → 0.9, >= 0.5 → 0.7,
/// anything lower keeps its ratio with a floor of 0.2.
pub fn title_alignment(cv_text: &str, canonical: &str) -> TitleAlignment {
    let ratio = alignment_ratio(cv_text, canonical);
    TitleAlignment {
        title_match_score: (ratio * 1000.0).round() / 10.0,
        title_match_strength: MatchStrength::from_ratio(ratio),
    }
}

fn alignment_ratio(cv_text: &str, canonical: &str) -> f64 {
    let title = canonical.trim().to_lowercase();
    if title.is_empty() {
        return EMPTY_TITLE_RATIO;
    }

    let text = cv_text.to_lowercase();
    if text.contains(&title) {
        return 1.0;
    }

    let words: Vec<&str> = title.split_whitespace().collect();
    let found = words.iter().filter(|w| text.contains(**w)).count();
    let ratio = found as f64 / words.len() as f64;

    match ratio {
        r if r >= 0.9 => 1.0,
        r if r >= 0.7 => 0.9,
        r if r >= 0.5 => 0.7,
        r => r.max(WEAK_FLOOR_RATIO),
    }
}
