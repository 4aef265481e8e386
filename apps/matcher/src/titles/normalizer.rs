use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::errors::AppError;
use crate::titles::like::escape_like;
use crate::titles::repository::TitleRepository;

/// Trailing occupational-taxonomy qualifier: ", except …" / ", all other …" to end of string.
static QUALIFIER_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is),\s*(?:except|all\s+other).*$").expect("qualifier clause pattern is valid")
});

/// Maps free-text job titles to canonical titles and answers the approval question.
pub struct TitleNormalizer {
    repo: Arc<dyn TitleRepository>,
}

impl TitleNormalizer {
    pub fn new(repo: Arc<dyn TitleRepository>) -> Self {
        Self { repo }
    }

    /// Resolves `raw` to its canonical form.
    ///
    /// 1. A taxonomy row whose canonical or source label equals `raw` (case-insensitive)
    ///    wins, approved or not, and its `standardised_title` is returned verbatim.
    /// 2. Otherwise the canonical form is derived from the text alone, see
    ///    [`heuristic_canonical`].
    pub async fn normalize(&self, raw: &str) -> Result<String, AppError> {
        if let Some(row) = self.repo.find_by_pattern(&escape_like(raw)).await? {
            debug!(
                raw,
                canonical = %row.standardised_title,
                id = row.id,
                "job title resolved from taxonomy"
            );
            return Ok(row.standardised_title);
        }

        let canonical = heuristic_canonical(raw);
        debug!(raw, canonical = %canonical, "job title derived heuristically");
        Ok(canonical)
    }

    /// Exact, case-sensitive existence check against `standardised_title`.
    pub async fn is_approved(&self, canonical: &str) -> Result<bool, AppError> {
        self.repo.exists_exact(canonical).await
    }
}

/// Drops a trailing ", except …" / ", all other …" clause, then one trailing `s`.
/// "Managers, except Farmers" → "Manager".
pub fn heuristic_canonical(raw: &str) -> String {
    let without_clause = QUALIFIER_CLAUSE.replace(raw, "");
    let trimmed = without_clause.trim();
    trimmed
        .strip_suffix('s')
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::title::NewStandardisedTitle;
    use crate::titles::memory::InMemoryTitleRepository;

    fn taxonomy(rows: &[(&str, &str, &str)]) -> Arc<InMemoryTitleRepository> {
        Arc::new(InMemoryTitleRepository::seeded(rows.iter().map(
            |(code, original, standardised)| NewStandardisedTitle {
                original_code: code.to_string(),
                original_title: original.to_string(),
                standardised_title: standardised.to_string(),
                is_approved: true,
            },
        )))
    }

    #[test]
    fn test_heuristic_strips_except_clause_and_plural() {
        assert_eq!(heuristic_canonical("Managers, except Farmers"), "Manager");
        assert_eq!(
            heuristic_canonical("Gaming Managers, Except Gambling"),
            "Gaming Manager"
        );
    }

    #[test]
    fn test_heuristic_strips_all_other_clause() {
        assert_eq!(heuristic_canonical("Engineers, All Other"), "Engineer");
        assert_eq!(
            heuristic_canonical("Sales Representatives, all other services"),
            "Sales Representative"
        );
    }

    #[test]
    fn test_heuristic_clause_needs_no_word_boundary() {
        assert_eq!(heuristic_canonical("Engineers, All Others"), "Engineer");
        assert_eq!(heuristic_canonical("Nurses, Exceptional Care"), "Nurse");
    }

    #[test]
    fn test_heuristic_strips_single_trailing_s_only() {
        assert_eq!(heuristic_canonical("Bosses"), "Bosse");
        assert_eq!(heuristic_canonical("Analysts"), "Analyst");
        assert_eq!(heuristic_canonical("Ninja Rockstar"), "Ninja Rockstar");
    }

    #[test]
    fn test_heuristic_keeps_other_commas() {
        assert_eq!(
            heuristic_canonical("Teachers, Secondary School"),
            "Teachers, Secondary School"
        );
    }

    #[test]
    fn test_heuristic_trims_and_handles_empty() {
        assert_eq!(heuristic_canonical("  Welders  "), "Welder");
        assert_eq!(heuristic_canonical(""), "");
        assert_eq!(heuristic_canonical("s"), "");
    }

    #[tokio::test]
    async fn test_known_canonical_normalizes_to_itself_and_is_approved() {
        let repo = taxonomy(&[
            ("15-1252.00", "Software Developers", "Software Developer"),
            ("11-1021.00", "General and Operations Managers", "General & Operations Manager"),
            ("29-1141.00", "Registered Nurses", "Registered Nurse"),
        ]);
        let normalizer = TitleNormalizer::new(repo);

        for title in [
            "Software Developer",
            "General & Operations Manager",
            "Registered Nurse",
        ] {
            let canonical = normalizer.normalize(title).await.unwrap();
            assert_eq!(canonical, title);
            assert!(normalizer.is_approved(&canonical).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_lookup_matches_source_label_case_insensitively() {
        let repo = taxonomy(&[("15-1252.00", "Software Developers", "Software Developer")]);
        let normalizer = TitleNormalizer::new(repo);
        assert_eq!(
            normalizer.normalize("software DEVELOPERS").await.unwrap(),
            "Software Developer"
        );
    }

    #[tokio::test]
    async fn test_lookup_does_not_treat_input_as_wildcard() {
        let repo = taxonomy(&[("11-1011.00", "Chief Executives", "Chief Executive")]);
        let normalizer = TitleNormalizer::new(repo);
        assert_eq!(normalizer.normalize("%").await.unwrap(), "%");
        assert_eq!(normalizer.normalize("Chief_Executive").await.unwrap(), "Chief_Executive");
    }

    #[tokio::test]
    async fn test_lookup_includes_unapproved_rows() {
        let repo = Arc::new(InMemoryTitleRepository::seeded(vec![NewStandardisedTitle {
            original_code: "X-1".to_string(),
            original_title: "Growth Hackers".to_string(),
            standardised_title: "Growth Marketer".to_string(),
            is_approved: false,
        }]));
        let normalizer = TitleNormalizer::new(repo);
        assert_eq!(
            normalizer.normalize("growth hackers").await.unwrap(),
            "Growth Marketer"
        );
    }

    #[tokio::test]
    async fn test_qualifier_titles_fall_back_to_heuristic() {
        let normalizer = TitleNormalizer::new(Arc::new(InMemoryTitleRepository::new()));
        assert_eq!(
            normalizer.normalize("Managers, except Farmers").await.unwrap(),
            "Manager"
        );
        assert_eq!(
            normalizer.normalize("Designers, all other").await.unwrap(),
            "Designer"
        );
    }

    #[tokio::test]
    async fn test_approval_is_exact_match() {
        let repo = taxonomy(&[("11-0000.00", "Managers", "Manager")]);
        let normalizer = TitleNormalizer::new(repo);
        assert!(normalizer.is_approved("Manager").await.unwrap());
        assert!(!normalizer.is_approved("manager").await.unwrap());
        assert!(!normalizer.is_approved("").await.unwrap());
    }
}
