// src/images/resolver.rs
//! Resolves remote image references to locally cached files.
//!
//! Only URLs on the configured storage host are handled; everything else
//! passes through untouched. Cache identity is the *key* — the path after
//! the host with the query string stripped — so signed-URL variants of the
//! same object share one cached artifact and one fetch.

use crate::constants::{IMAGE_DIR_NAME, IMAGE_FETCH_TIMEOUT_SECS};
use crate::error::AppError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Retrieves image binaries. Seam for tests — the production implementation
/// goes through HTTP, test doubles count calls.
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetches the binary for one key. A single attempt; any failure
    /// (status, content-type, timeout, transport) is terminal for the call.
    async fn fetch(&self, key: &str, original_url: &str) -> Result<Vec<u8>, FetchFailure>;
}

/// Why a single image fetch attempt failed. Always recovered locally:
/// the resolver keeps the original remote URL and warns.
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("not an image (content-type: {0})")]
    NotAnImage(String),
}

/// Fetches image binaries over HTTP, optionally through a proxy endpoint
/// keyed by the extracted image key.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    proxy_base: Option<Url>,
}

impl HttpImageFetcher {
    pub fn new(proxy_base: Option<Url>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(IMAGE_FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, proxy_base })
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, key: &str, original_url: &str) -> Result<Vec<u8>, FetchFailure> {
        let target = match &self.proxy_base {
            Some(base) => base
                .join(key)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| original_url.to_string()),
            None => original_url.to_string(),
        };

        let response = self.client.get(&target).send().await?;
        if !response.status().is_success() {
            return Err(FetchFailure::Status(response.status()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(FetchFailure::NotAnImage(content_type));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Maps remote image URLs on one storage host to stable local paths,
/// downloading and caching each binary on first use.
pub struct ImageResolver {
    host: String,
    output_dir: PathBuf,
    fetcher: Box<dyn ImageFetcher>,
    /// Per-run key → resolution map. Guarantees one fetch per key even
    /// before the file lands on disk, and caches failures so a second
    /// signed-URL variant never triggers a retry.
    resolved: HashMap<String, String>,
}

impl ImageResolver {
    pub fn new(host: impl Into<String>, output_dir: &Path, fetcher: Box<dyn ImageFetcher>) -> Self {
        Self {
            host: host.into(),
            output_dir: output_dir.to_path_buf(),
            fetcher,
            resolved: HashMap::new(),
        }
    }

    /// The storage host this resolver recognizes.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Extracts the cache key from a URL: the path after the host with the
    /// query string stripped. `None` when the URL is not on the recognized
    /// host or has no usable path.
    pub fn image_key(&self, raw_url: &str) -> Option<String> {
        let parsed = Url::parse(raw_url).ok()?;
        if parsed.host_str() != Some(self.host.as_str()) {
            return None;
        }
        let key = parsed.path().trim_start_matches('/');
        if key.is_empty() {
            return None;
        }
        // Refuse keys that would escape the images directory.
        if key.split('/').any(|segment| segment == "..") {
            return None;
        }
        Some(key.to_string())
    }

    /// Resolves a URL to a `./`-prefixed local path suitable for Markdown
    /// embedding, or returns the original URL when the host is not
    /// recognized or the fetch fails.
    pub async fn resolve(&mut self, raw_url: &str) -> String {
        let Some(key) = self.image_key(raw_url) else {
            return raw_url.to_string();
        };

        if let Some(hit) = self.resolved.get(&key) {
            return hit.clone();
        }

        let local_path = self.local_path(&key);
        let markdown_path = format!("./{}/{}", IMAGE_DIR_NAME, key);

        // Idempotent across runs: an already-cached file is reused with no
        // network call.
        if local_path.exists() {
            self.resolved.insert(key, markdown_path.clone());
            return markdown_path;
        }

        let outcome = match self.fetcher.fetch(&key, raw_url).await {
            Ok(bytes) => match persist(&local_path, &bytes) {
                Ok(()) => {
                    log::info!("Cached image {} ({} bytes)", key, bytes.len());
                    markdown_path
                }
                Err(err) => {
                    log::warn!("Could not store image {}: {}", key, err);
                    raw_url.to_string()
                }
            },
            Err(err) => {
                log::warn!("Image fetch failed for {}: {}", key, err);
                raw_url.to_string()
            }
        };

        self.resolved.insert(key, outcome.clone());
        outcome
    }

    fn local_path(&self, key: &str) -> PathBuf {
        let mut path = self.output_dir.join(IMAGE_DIR_NAME);
        for segment in key.split('/') {
            path.push(segment);
        }
        path
    }
}

fn persist(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
