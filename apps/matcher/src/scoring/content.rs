use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::BaseScorer;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Points earned per dimension. Caps: sections 45, metrics 15, verbs 20, quality 15, dates 10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sections: u32,
    pub metrics: u32,
    pub action_verbs: u32,
    pub quality: u32,
    pub dates: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssues {
    pub generic_phrases: bool,
    pub passive_voice: bool,
    pub pronouns: bool,
}

impl QualityIssues {
    fn count(&self) -> u32 {
        [self.generic_phrases, self.passive_voice, self.pronouns]
            .iter()
            .filter(|flag| **flag)
            .count() as u32
    }
}

/// Full content report: the base score plus everything needed to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAssessment {
    pub score: u32, // 0 – 100
    pub breakdown: ScoreBreakdown,
    pub missing_sections: Vec<String>,
    pub metrics_found: Vec<String>,
    pub action_verbs_found: Vec<String>,
    pub quality_issues: QualityIssues,
    pub date_ranges_found: Vec<String>,
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

const SECTIONS: &[(&str, u32)] = &[
    ("contact", 5),
    ("summary", 5),
    ("experience", 10),
    ("education", 10),
    ("skills", 10),
    ("projects", 5),
];

const ACTION_VERBS: &[&str] = &[
    "achieved", "administered", "advised", "analysed", "analyzed", "assessed", "audited",
    "automated", "budgeted", "built", "coached", "collaborated", "configured", "conducted",
    "coordinated", "created", "debugged", "delivered", "deployed", "designed", "developed",
    "diagnosed", "directed", "documented", "drafted", "engineered", "evaluated", "executed",
    "expanded", "facilitated", "forecasted", "generated", "guided", "identified",
    "implemented", "improved", "increased", "innovated", "integrated", "investigated",
    "launched", "led", "maintained", "managed", "mentored", "monitored", "negotiated",
    "optimised", "optimized", "orchestrated", "organised", "organized", "oversaw",
    "presented", "programmed", "published", "recruited", "reduced", "researched", "resolved",
    "spearheaded", "streamlined", "supervised", "tested", "trained", "transformed",
    "validated",
];

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(contact|summary|profile|experience|education|skills|projects)\s*:?\s*$")
        .expect("section header pattern is valid")
});

static SECTION_KEYWORDS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("contact", r"(?i)\b(?:contact|e-?mail|phone|mobile|address|linkedin)\b"),
        ("summary", r"(?i)\b(?:summary|objective|profile|about me)\b"),
        ("experience", r"(?i)\b(?:experience|work\s+history|employment)\b"),
        ("education", r"(?i)\b(?:education|academic|degree|university|college)\b"),
        ("skills", r"(?i)\b(?:skills|proficient|competencies|expertise)\b"),
        ("projects", r"(?i)\b(?:projects|portfolio|case\s+studies)\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("section keyword pattern is valid")))
    .collect()
});

static METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\$\d[\d,]*(?:\.\d+)?[kmb]?|\b\d+(?:\.\d+)?\s*%|\b\d+(?:\.\d+)?x\b|\b\d+\+|\b\d+\s*(?:years?|yrs?)\b|\b\d{3,}\b",
    )
    .expect("metric pattern is valid")
});

static ACTION_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", ACTION_VERBS.join("|")))
        .expect("action verb pattern is valid")
});

static GENERIC_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)team\s*player|hard\s*worker|detail[\s-]*oriented|go[\s-]*getter")
        .expect("generic phrase pattern is valid")
});

static PASSIVE_VOICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:was|were)\s+\w+ed\b|\bresponsible\s+for\b")
        .expect("passive voice pattern is valid")
});

static PRONOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:I|[Mm]y|[Mm]e)\b").expect("pronoun pattern is valid"));

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let month = r"\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?";
    Regex::new(&format!(
        r"(?i){month}\s+\d{{4}}\s*(?:-|–|—|to)\s*(?:present|current|now|{month}\s+\d{{4}})"
    ))
    .expect("date range pattern is valid")
});

static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://\S+|\bpage\s*\d+\b").expect("noise pattern is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// ContentScorer
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic résumé content scorer: same text, same score.
///
/// Algorithm:
/// 1. Sections: core sections (experience, education, skills) 10 points, others 5,
///    found by header line or keyword fallback.
/// 2. Metrics: 2 points per quantified token, max 15.
/// 3. Action verbs: 2 points per distinct verb, max 20.
/// 4. Quality: 15 minus 8 per issue (generic phrases, passive voice, pronouns outside summary).
/// 5. Dates: 3 points per employment date range once there are at least two, max 10.
/// 6. Total capped at 100.
pub struct ContentScorer;

impl BaseScorer for ContentScorer {
    fn base_score(&self, cv_text: &str) -> f64 {
        f64::from(self.assess(cv_text).score)
    }
}

impl ContentScorer {
    pub fn assess(&self, cv_text: &str) -> ContentAssessment {
        let text = NOISE.replace_all(cv_text, "");

        let sections = detect_sections(&text);
        let metrics: Vec<String> = METRIC
            .find_iter(&text)
            .map(|m| m.as_str().trim().to_string())
            .collect();
        let verbs: BTreeSet<String> = ACTION_VERB
            .find_iter(&text)
            .map(|m| m.as_str().to_lowercase())
            .collect();
        let quality_issues = QualityIssues {
            generic_phrases: GENERIC_PHRASE.is_match(&text),
            passive_voice: PASSIVE_VOICE.is_match(&text),
            pronouns: pronouns_outside_summary(&text),
        };
        let date_ranges: Vec<String> = DATE_RANGE
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect();

        let breakdown = ScoreBreakdown {
            sections: sections
                .iter()
                .filter(|(_, present)| *present)
                .map(|(name, _)| section_weight(name))
                .sum(),
            metrics: (metrics.len() as u32).saturating_mul(2).min(15),
            action_verbs: (verbs.len() as u32).saturating_mul(2).min(20),
            quality: 15u32.saturating_sub(8 * quality_issues.count()),
            dates: if date_ranges.len() < 2 {
                0
            } else {
                (date_ranges.len() as u32).saturating_mul(3).min(10)
            },
        };

        let score = (breakdown.sections
            + breakdown.metrics
            + breakdown.action_verbs
            + breakdown.quality
            + breakdown.dates)
            .min(100);

        let has = |name: &str| sections.iter().any(|(n, present)| *n == name && *present);
        let suggestions = build_suggestions(SuggestionInputs {
            score,
            has_experience: has("experience"),
            has_education: has("education"),
            has_skills: has("skills"),
            metrics: metrics.len(),
            verbs: verbs.len(),
            quality: &quality_issues,
            date_ranges: date_ranges.len(),
        });

        ContentAssessment {
            score,
            breakdown,
            missing_sections: sections
                .iter()
                .filter(|(_, present)| !present)
                .map(|(name, _)| name.to_string())
                .collect(),
            metrics_found: metrics,
            action_verbs_found: verbs.into_iter().collect(),
            quality_issues,
            date_ranges_found: date_ranges,
            suggestions,
        }
    }
}

fn section_weight(name: &str) -> u32 {
    SECTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, w)| *w)
        .unwrap_or(0)
}

fn canonical_section(header: &str) -> String {
    match header.to_lowercase().as_str() {
        "profile" => "summary".to_string(),
        other => other.to_string(),
    }
}

/// Presence of each known section, in `SECTIONS` order.
fn detect_sections(text: &str) -> Vec<(&'static str, bool)> {
    let headers: BTreeSet<String> = SECTION_HEADER
        .captures_iter(text)
        .map(|caps| canonical_section(&caps[1]))
        .collect();

    SECTIONS
        .iter()
        .map(|(name, _)| {
            let by_keyword = SECTION_KEYWORDS
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, re)| re.is_match(text))
                .unwrap_or(false);
            (*name, headers.contains(*name) || by_keyword)
        })
        .collect()
}

/// First-person pronouns are fine in a summary; anywhere under another header they are flagged.
fn pronouns_outside_summary(text: &str) -> bool {
    let mut current: Option<String> = None;
    for line in text.lines() {
        if let Some(caps) = SECTION_HEADER.captures(line) {
            current = Some(canonical_section(&caps[1]));
            continue;
        }
        match current.as_deref() {
            Some("summary") | None => {}
            Some(_) => {
                if PRONOUN.is_match(line) {
                    return true;
                }
            }
        }
    }
    false
}

struct SuggestionInputs<'a> {
    score: u32,
    has_experience: bool,
    has_education: bool,
    has_skills: bool,
    metrics: usize,
    verbs: usize,
    quality: &'a QualityIssues,
    date_ranges: usize,
}

/// Prioritised improvement suggestions; praise first, then critical gaps, then polish.
fn build_suggestions(inputs: SuggestionInputs<'_>) -> Vec<String> {
    let mut suggestions = Vec::new();

    if inputs.score >= 90
        && inputs.has_experience
        && inputs.has_education
        && inputs.metrics >= 5
        && inputs.verbs >= 8
    {
        suggestions.push("Outstanding! Your resume exceeds ATS optimisation standards.".to_string());
    } else if inputs.score >= 80 {
        suggestions.push("Excellent resume! It meets most ATS optimisation criteria.".to_string());
    } else if inputs.score >= 75 {
        suggestions.push("Great job! Your resume performs well in ATS systems.".to_string());
    }

    if !inputs.has_experience {
        suggestions
            .push("CRITICAL: Add a Work Experience section with position details".to_string());
    }
    if !inputs.has_education {
        suggestions.push("CRITICAL: Include your Education background".to_string());
    }
    if !inputs.has_skills {
        suggestions
            .push("IMPORTANT: Add a Skills section with relevant competencies".to_string());
    }

    if inputs.metrics < 3 {
        suggestions.push(
            "Boost impact: Add 2-3 quantifiable achievements (e.g., 'Increased sales by 30%')"
                .to_string(),
        );
    }
    if inputs.verbs < 5 {
        suggestions.push(
            "Use more action verbs like 'developed', 'optimised', or 'managed' to describe achievements"
                .to_string(),
        );
    }

    if inputs.quality.generic_phrases {
        suggestions
            .push("Replace generic phrases like 'team player' with specific examples".to_string());
    }
    if inputs.quality.pronouns {
        suggestions.push(
            "Reduce use of pronouns (I/my) in work experience - use action verbs instead"
                .to_string(),
        );
    }
    if inputs.quality.passive_voice {
        suggestions.push(
            "Convert passive voice to active (e.g., 'was responsible for' → 'managed')".to_string(),
        );
    }

    if inputs.date_ranges < 2 && inputs.has_experience {
        suggestions
            .push("Include date ranges for all positions (e.g., 'May 2020 - Present')".to_string());
    }

    suggestions
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
