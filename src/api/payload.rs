// src/api/payload.rs
//! Export payload parsing.
//!
//! The export arrives in one of two shapes, supported transparently: a plain
//! object with a `topics` array, or an API-gateway envelope whose `body`
//! field is a JSON *string* that itself decodes to that object.

use crate::error::AppError;
use crate::model::Article;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Loads and parses the export file. Missing file and undecodable JSON are
/// fatal input errors that abort the whole conversion.
pub fn load_export_file(path: &Path) -> Result<Vec<Article>, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|source| AppError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| AppError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(value)
}

/// Extracts the articles from an export payload value.
pub fn parse_export(value: Value) -> Result<Vec<Article>, AppError> {
    let inner = unwrap_body(value)?;

    let topics = inner
        .get("topics")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::MalformedExport("missing `topics` array".to_string()))?;

    let mut articles = Vec::with_capacity(topics.len());
    for (position, topic) in topics.iter().enumerate() {
        match Article::deserialize(topic.clone()) {
            Ok(article) => articles.push(article),
            Err(err) => {
                // One malformed record must not abort the batch.
                log::warn!("Skipping malformed article at position {}: {}", position + 1, err);
            }
        }
    }
    Ok(articles)
}

/// Unwraps the optional one-level `body` JSON-string nesting.
pub fn unwrap_body(value: Value) -> Result<Value, AppError> {
    match value.get("body").and_then(Value::as_str) {
        Some(body) => serde_json::from_str(body)
            .map_err(|err| AppError::MalformedExport(format!("undecodable `body` field: {}", err))),
        None => Ok(value),
    }
}
