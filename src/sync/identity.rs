// src/sync/identity.rs
//! Content-based identity lookup for previously persisted documents.
//!
//! Filenames are derived from a human-readable date and slug and are not
//! stable across runs, so a prior document is found by the identity marker
//! line embedded in its Basic Information block, never by filename pattern.
//! The lookup sits behind a trait so a persisted id → path map can replace
//! the directory scan without changing the engine's contract.

use crate::constants::{IDENTITY_MARKER_PREFIX, INDEX_FILE_NAME};
use crate::error::AppError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps an article identity to the prior run's document, if any.
pub trait IdentityIndex {
    fn lookup(&self, article_id: &str) -> Option<&Path>;
}

/// Extracts the embedded identity marker from a document's text.
pub fn embedded_identity(document: &str) -> Option<&str> {
    document
        .lines()
        .find_map(|line| line.strip_prefix(IDENTITY_MARKER_PREFIX))
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Identity index built by scanning every Markdown document in the output
/// directory once per run. O(existing documents) to build, O(1) per lookup.
#[derive(Debug, Default)]
pub struct DirectoryScanIndex {
    entries: HashMap<String, PathBuf>,
}

impl DirectoryScanIndex {
    /// Scans `dir` for generated documents and their identity markers.
    /// A missing directory is an empty index (first run).
    pub fn scan(dir: &Path) -> Result<Self, AppError> {
        let mut entries = HashMap::new();

        if !dir.exists() {
            return Ok(Self { entries });
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if path.file_name().and_then(|n| n.to_str()) == Some(INDEX_FILE_NAME) {
                continue;
            }

            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    if let Some(id) = embedded_identity(&content) {
                        entries.insert(id.to_string(), path);
                    }
                }
                Err(err) => {
                    log::warn!("Skipping unreadable document {}: {}", path.display(), err);
                }
            }
        }

        log::debug!("Identity index holds {} documents", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IdentityIndex for DirectoryScanIndex {
    fn lookup(&self, article_id: &str) -> Option<&Path> {
        self.entries.get(article_id).map(PathBuf::as_path)
    }
}
