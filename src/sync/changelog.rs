// src/sync/changelog.rs
//! The append-to-front run journal and the per-run article index.
//!
//! Each run prepends a dated entry above all previously recorded entries:
//! read-old, write-new+old. The journal is never diffed or deduplicated
//! against its own history, so a title may legitimately appear in many
//! entries. Most recent first, for audit readability.

use super::engine::{SyncOutcome, SyncStatus};
use crate::error::AppError;
use std::path::Path;

/// Prepends this run's entry to the journal at `log_path`.
///
/// Links point into `output_dir` since the journal lives in the working
/// directory, one level above the documents.
pub fn append_run_entry(
    log_path: &Path,
    output_dir: &Path,
    timestamp: &str,
    outcomes: &[SyncOutcome],
) -> Result<(), AppError> {
    let new_count = count(outcomes, SyncStatus::New);
    let updated_count = count(outcomes, SyncStatus::Updated);

    let mut entry = String::new();
    entry.push_str(&format!("## Log Entry - {}\n", timestamp));
    entry.push_str(&format!("> Total articles: {}\n", outcomes.len()));
    entry.push_str(&format!("> New articles: {}\n", new_count));
    entry.push_str(&format!("> Updated articles: {}\n", updated_count));
    entry.push('\n');

    for outcome in outcomes.iter().filter(|o| o.was_written()) {
        let marker = match outcome.status {
            SyncStatus::New => "new",
            SyncStatus::Updated => "updated",
            SyncStatus::Unchanged => continue,
        };
        entry.push_str(&format!(
            "- [{}]({}) ({})\n",
            outcome.title,
            link_target(output_dir, &outcome.filename),
            marker
        ));
    }
    entry.push('\n');

    let history = match std::fs::read_to_string(log_path) {
        Ok(existing) => existing,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };

    std::fs::write(log_path, format!("{}{}", entry, history))?;
    Ok(())
}

/// Rewrites the article index inside the output directory: every article of
/// the current run, with byline, date and a status marker where applicable.
pub fn write_index(output_dir: &Path, outcomes: &[SyncOutcome]) -> Result<(), AppError> {
    let mut content = String::from("# News Articles Summary\n\n");

    for outcome in outcomes {
        let author_line = if outcome.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            outcome.authors.join(", ")
        };
        let marker = match outcome.status {
            SyncStatus::New => " (new)",
            SyncStatus::Updated => " (updated)",
            SyncStatus::Unchanged => "",
        };
        content.push_str(&format!(
            "- [{}]({}) — {} ({}){}\n",
            outcome.title, outcome.filename, author_line, outcome.display_date, marker
        ));
    }

    std::fs::create_dir_all(output_dir)?;
    std::fs::write(
        output_dir.join(crate::constants::INDEX_FILE_NAME),
        content,
    )?;
    Ok(())
}

fn count(outcomes: &[SyncOutcome], status: SyncStatus) -> usize {
    outcomes.iter().filter(|o| o.status == status).count()
}

fn link_target(output_dir: &Path, filename: &str) -> String {
    output_dir
        .join(filename)
        .to_string_lossy()
        .replace('\\', "/")
}
