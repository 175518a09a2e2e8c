// src/sync/slug.rs
//! Title slugification for output filenames.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("disallowed-chars regex is valid"));
static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("separator-run regex is valid"));

/// Normalizes a title into a URL-safe slug: NFKC-composed, lowercased,
/// stripped to word characters / whitespace / hyphens, with separator runs
/// collapsed to a single hyphen.
///
/// May return an empty string (e.g. a title made entirely of punctuation);
/// callers fall back to a positional placeholder.
pub fn slugify(title: &str) -> String {
    let composed: String = title.nfkc().collect();
    let lowered = composed.to_lowercase();
    let stripped = DISALLOWED_RE.replace_all(&lowered, "");
    let hyphenated = SEPARATOR_RUN_RE.replace_all(&stripped, "-");
    hyphenated
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}
