use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::extraction::{FileTextExtractor, TextExtractor};
use crate::scoring::content::ContentScorer;
use crate::titles::matcher::JobTitleMatcher;
use crate::titles::postgres::PgTitleRepository;

/// Shared application state handed to every command.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub titles: Arc<PgTitleRepository>,
    pub matcher: Arc<JobTitleMatcher>,
    /// Content scorer used both as the matcher's base score and for feedback.
    pub content: Arc<ContentScorer>,
    /// Pluggable text extractor. Default: FileTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        let titles = Arc::new(PgTitleRepository::new(db.clone()));
        let content = Arc::new(ContentScorer);
        let matcher = Arc::new(JobTitleMatcher::new(titles.clone(), content.clone()));

        Self {
            db,
            config,
            titles,
            matcher,
            content,
            extractor: Arc::new(FileTextExtractor),
        }
    }
}
