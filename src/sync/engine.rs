// src/sync/engine.rs
//! Incremental sync engine.
//!
//! Classifies each freshly assembled document against the previous run's
//! output — by content comparison, never by timestamp — and writes only what
//! changed. Unchanged documents are left untouched, preserving file
//! modification metadata and avoiding churn in version control.

use super::identity::{embedded_identity, IdentityIndex};
use super::slug::slugify;
use crate::error::AppError;
use crate::model::Article;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Terminal classification of one article for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No prior document with this identity exists.
    New,
    /// A prior document exists but differs byte-for-byte.
    Updated,
    /// A prior document exists and is byte-identical. Nothing written.
    Unchanged,
}

/// Structured outcome for one article, consumed by the reporting layer and
/// the change log — the engine itself never prints.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub article_id: String,
    pub title: String,
    /// Filename the document lives under after this run.
    pub filename: String,
    pub status: SyncStatus,
    pub authors: Vec<String>,
    pub display_date: String,
}

impl SyncOutcome {
    pub fn was_written(&self) -> bool {
        !matches!(self.status, SyncStatus::Unchanged)
    }
}

/// Compares assembled documents against prior output and decides what to
/// (re)write.
pub struct SyncEngine<I> {
    output_dir: PathBuf,
    index: I,
    /// Filenames claimed during this run, for collision disambiguation.
    claimed: HashSet<String>,
}

impl<I: IdentityIndex> SyncEngine<I> {
    pub fn new(output_dir: &Path, index: I) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            index,
            claimed: HashSet::new(),
        }
    }

    /// Classifies one article and writes its document iff new or updated.
    ///
    /// `position` is the 1-based position in the export, used only as the
    /// slug fallback for articles whose title produces an empty slug.
    pub fn sync_article(
        &mut self,
        article: &Article,
        position: usize,
        document: &str,
    ) -> Result<SyncOutcome, AppError> {
        let prior = self.index.lookup(&article.id).map(Path::to_path_buf);

        let status = match &prior {
            None => SyncStatus::New,
            Some(path) => match std::fs::read_to_string(path) {
                Ok(existing) if existing == document => SyncStatus::Unchanged,
                Ok(_) => SyncStatus::Updated,
                Err(err) => {
                    log::warn!(
                        "Could not read prior document {}: {} — treating as updated",
                        path.display(),
                        err
                    );
                    SyncStatus::Updated
                }
            },
        };

        let filename = match (status, &prior) {
            // Keep the file exactly where it is.
            (SyncStatus::Unchanged, Some(path)) => file_name_of(path),
            _ => {
                let name = self.choose_filename(article, position, prior.as_deref())?;
                self.write_document(&name, document, prior.as_deref())?;
                name
            }
        };
        self.claimed.insert(filename.clone());

        Ok(SyncOutcome {
            article_id: article.id.clone(),
            title: article.title.clone(),
            filename,
            status,
            authors: article.authors.clone(),
            display_date: article.display_date(),
        })
    }

    /// Derives `{date}-{slug}.md`, disambiguating collisions with a numeric
    /// suffix. A candidate collides when another article claimed it this run,
    /// or when it already exists on disk carrying a different identity.
    fn choose_filename(
        &self,
        article: &Article,
        position: usize,
        prior: Option<&Path>,
    ) -> Result<String, AppError> {
        let slug = {
            let s = slugify(&article.title);
            if s.is_empty() {
                format!("article-{}", position)
            } else {
                s
            }
        };
        let base = match article.edit_date() {
            Some(date) => format!("{}-{}", date.format("%Y-%m-%d"), slug),
            None => slug,
        };

        let mut candidate = format!("{}.md", base);
        let mut suffix = 2;
        while self.collides(&candidate, &article.id, prior)? {
            candidate = format!("{}-{}.md", base, suffix);
            suffix += 1;
        }
        Ok(candidate)
    }

    fn collides(
        &self,
        filename: &str,
        article_id: &str,
        prior: Option<&Path>,
    ) -> Result<bool, AppError> {
        if self.claimed.contains(filename) {
            return Ok(true);
        }

        let path = self.output_dir.join(filename);
        if !path.exists() {
            return Ok(false);
        }
        // Overwriting this article's own prior file is not a collision.
        if prior == Some(path.as_path()) {
            return Ok(false);
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(embedded_identity(&content) != Some(article_id))
    }

    fn write_document(
        &self,
        filename: &str,
        document: &str,
        prior: Option<&Path>,
    ) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(filename);
        std::fs::write(&path, document)?;
        log::debug!("Wrote {}", path.display());

        // A title or date change moves the document; drop the stale file so
        // the identity never exists twice in the output directory.
        if let Some(old) = prior {
            if old != path.as_path() {
                if let Err(err) = std::fs::remove_file(old) {
                    log::warn!("Could not remove stale document {}: {}", old.display(), err);
                }
            }
        }

        Ok(())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}
