// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Export API boundaries
// ---------------------------------------------------------------------------

/// Path of the export endpoint, relative to the configured API base URL.
pub const EXPORT_ENDPOINT: &str = "v1/topics/export";

/// Articles requested per export batch when the operator does not override it.
pub const DEFAULT_BATCH_SIZE: u32 = 5;

/// Number of export batches fetched per run by default.
pub const DEFAULT_NUM_BATCHES: u32 = 2;

// ---------------------------------------------------------------------------
// Image retrieval boundaries
// ---------------------------------------------------------------------------

/// Ceiling on a single image fetch attempt. One attempt per key, no retries;
/// on timeout the resolver keeps the original remote URL.
pub const IMAGE_FETCH_TIMEOUT_SECS: u64 = 15;

/// Subdirectory of the output root where cached image binaries live.
pub const IMAGE_DIR_NAME: &str = "images";

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

/// The append-to-front journal, written in the working directory.
pub const CHANGELOG_FILE_NAME: &str = "log.md";

/// Per-run article summary, written inside the output directory.
pub const INDEX_FILE_NAME: &str = "index.md";

/// Prefix of the identity marker line embedded in every generated document.
/// Sync lookups scan for this line, never for filename patterns.
pub const IDENTITY_MARKER_PREFIX: &str = "- **ID**: ";
