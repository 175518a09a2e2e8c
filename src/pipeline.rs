// src/pipeline.rs
//! Pipeline capability traits — the three stages of the export-to-Markdown
//! pipeline, each testable in isolation.

use crate::error::AppError;
use crate::model::Article;
use crate::sync::SyncOutcome;

/// Retrieves the articles to convert.
#[async_trait::async_trait]
pub trait ArticleSource {
    async fn fetch(&self) -> Result<Vec<Article>, AppError>;
}

/// Composes one article into its Markdown document.
#[async_trait::async_trait]
pub trait DocumentComposer {
    async fn compose(&mut self, article: &Article) -> Result<String, AppError>;
}

/// Classifies an assembled document against prior output and persists it.
pub trait DocumentSink {
    fn sink(
        &mut self,
        article: &Article,
        position: usize,
        document: &str,
    ) -> Result<SyncOutcome, AppError>;
}
