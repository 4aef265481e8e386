//! Base résumé quality scoring.
//!
//! The matcher only needs a number in [0, 100]; `BaseScorer` keeps that seam pluggable.
//! Default: `ContentScorer` (deterministic section/metric/verb/quality/date heuristic).

pub mod content;
pub mod title_match;

/// Deterministic résumé quality score in [0, 100].
///
/// Carried by the matcher as `Arc<dyn BaseScorer>`; tests substitute fixed values.
pub trait BaseScorer: Send + Sync {
    fn base_score(&self, cv_text: &str) -> f64;
}
