// src/sync/mod.rs
//! Incremental sync: content-based classification of each article against
//! the previous run's output, plus the run journal.

mod changelog;
mod engine;
mod identity;
mod slug;

pub use changelog::{append_run_entry, write_index};
pub use engine::{SyncEngine, SyncOutcome, SyncStatus};
pub use identity::{embedded_identity, DirectoryScanIndex, IdentityIndex};
pub use slug::slugify;
