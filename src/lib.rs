// src/lib.rs
//! topics2md library — converts a JSON export of news articles into Markdown
//! files with incremental, content-based sync.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`
//! - **Configuration** — `PipelineConfig`
//! - **Domain model** — `Article`, `ContentNode`, `TextMark`
//! - **Rendering** — `render_document`, `apply_marks`
//! - **Images** — `ImageResolver`, `ImageFetcher`, `rewrite_images`
//! - **Sync** — `SyncEngine`, `DirectoryScanIndex`, `slugify`, the change log
//! - **Export retrieval** — `ExportHttpClient`, payload parsing

// Internal modules
mod analytics;
mod api;
mod assemble;
mod config;
mod constants;
mod error;
mod formatting;
mod images;
mod model;
mod pipeline;
mod sync;

// --- Error Handling ---
pub use crate::error::AppError;

// --- Configuration ---
pub use crate::config::{ApiSettings, CommandLineInput, ImageSettings, PipelineConfig};

// --- Domain Model ---
pub use crate::model::{Article, ArticleBody, ContentNode, TextMark};

// --- Rendering ---
pub use crate::formatting::{apply_marks, render_document, render_node};

// --- Article Assembly ---
pub use crate::assemble::{clean_text, format_authors, ArticleAssembler};

// --- Images ---
pub use crate::images::{
    rewrite_images, FetchFailure, HttpImageFetcher, ImageFetcher, ImageResolver,
};

// --- Sync ---
pub use crate::sync::{
    append_run_entry, embedded_identity, slugify, write_index, DirectoryScanIndex, IdentityIndex,
    SyncEngine, SyncOutcome, SyncStatus,
};

// --- Output Layout ---
pub use crate::constants::{CHANGELOG_FILE_NAME, INDEX_FILE_NAME};

// --- Export Retrieval ---
pub use crate::api::{payload, ExportHttpClient};

// --- Run Statistics ---
pub use crate::analytics::{measure_run, RunStats};

// --- Pipeline Traits ---
pub use crate::pipeline::{ArticleSource, DocumentComposer, DocumentSink};
