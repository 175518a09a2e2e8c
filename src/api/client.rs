// src/api/client.rs
//! HTTP client for the topics export API.
//!
//! A thin wrapper around reqwest: authentication via the `x-api-key` header
//! and a paginated GET loop over the export endpoint. No parsing beyond
//! envelope unwrapping — the payload module owns the article shape.

use super::payload;
use crate::constants::EXPORT_ENDPOINT;
use crate::error::AppError;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::path::Path;

/// Client for the paginated topics export endpoint.
pub struct ExportHttpClient {
    client: Client,
    base_url: String,
}

impl ExportHttpClient {
    /// Creates a client authenticating every request with the given API key.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(api_key).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API key format: {}", e))
            })?,
        );

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches one export batch. Non-success statuses are errors here; the
    /// batch loop decides whether they abort the run.
    pub async fn fetch_batch(&self, limit: u32, offset: u32) -> Result<Vec<Value>, AppError> {
        let url = format!(
            "{}/{}?limit={}&offset={}",
            self.base_url, EXPORT_ENDPOINT, limit, offset
        );
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::ExportService {
                status: response.status(),
            });
        }

        let value: Value = response.json().await?;
        let inner = payload::unwrap_body(value)?;
        let topics = inner
            .get("topics")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(topics)
    }

    /// Downloads `num_batches` batches of `batch_size` articles, combining
    /// them into one export envelope written at `output_file`, and returns
    /// the number of articles fetched.
    ///
    /// A failed batch is warned and skipped; a short batch ends pagination.
    pub async fn download_to_file(
        &self,
        output_file: &Path,
        batch_size: u32,
        num_batches: u32,
    ) -> Result<usize, AppError> {
        let mut all_topics: Vec<Value> = Vec::new();

        for batch in 0..num_batches {
            let offset = batch * batch_size;
            log::info!(
                "Downloading batch {}/{} (offset {})",
                batch + 1,
                num_batches,
                offset
            );

            match self.fetch_batch(batch_size, offset).await {
                Ok(topics) => {
                    let short_batch = (topics.len() as u32) < batch_size;
                    log::info!("Batch {} returned {} articles", batch + 1, topics.len());
                    all_topics.extend(topics);
                    if short_batch {
                        log::info!("Short batch — no further pages");
                        break;
                    }
                }
                Err(err) => {
                    log::warn!("Batch {} failed: {} — continuing", batch + 1, err);
                }
            }
        }

        let combined = json!({
            "statusCode": 200,
            "headers": {"Content-Type": "application/json; charset=utf-8"},
            "body": serde_json::to_string(&json!({
                "meta": {
                    "limit": all_topics.len(),
                    "offset": 0,
                    "total_fetched": all_topics.len(),
                },
                "topics": all_topics,
            }))?,
        });

        std::fs::write(output_file, serde_json::to_string_pretty(&combined)?)?;
        log::info!(
            "Saved {} articles to {}",
            all_topics.len(),
            output_file.display()
        );
        Ok(all_topics.len())
    }
}
