// src/analytics.rs
//! Run statistics for user-facing summaries.
//!
//! Pure measurement over the export and the sync outcomes. Rendering the
//! numbers is the reporting layer's job, not the engine's.

use crate::model::Article;
use crate::sync::{SyncOutcome, SyncStatus};
use std::collections::HashSet;

/// Aggregate statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total_articles: usize,
    pub new_articles: usize,
    pub updated_articles: usize,
    pub unchanged_articles: usize,
    pub unique_tags: usize,
    pub unique_countries: usize,
    pub unique_authors: usize,
}

/// Measures a completed run.
pub fn measure_run(articles: &[Article], outcomes: &[SyncOutcome]) -> RunStats {
    let count = |status: SyncStatus| outcomes.iter().filter(|o| o.status == status).count();

    RunStats {
        total_articles: articles.len(),
        new_articles: count(SyncStatus::New),
        updated_articles: count(SyncStatus::Updated),
        unchanged_articles: count(SyncStatus::Unchanged),
        unique_tags: distinct(articles.iter().flat_map(|a| &a.tags)),
        unique_countries: distinct(articles.iter().flat_map(|a| &a.countries)),
        unique_authors: distinct(articles.iter().flat_map(|a| &a.authors)),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> usize {
    values.collect::<HashSet<_>>().len()
}
