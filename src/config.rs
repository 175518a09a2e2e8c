// src/config.rs
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_NUM_BATCHES};
use crate::error::AppError;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Input JSON file path (written by the download step, read by the converter)
    #[arg(long, default_value = "raw.json")]
    pub input: String,

    /// Output directory for generated Markdown files
    #[arg(long, default_value = "md_export")]
    pub out: String,

    /// Articles requested per export batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u32,

    /// Number of batches to download
    #[arg(long, default_value_t = DEFAULT_NUM_BATCHES)]
    pub num_batches: u32,

    /// Skip the download and convert the existing input file
    #[arg(long, default_value_t = false)]
    pub skip_download: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Export API credentials, required unless the download is skipped.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
}

/// Image localization settings. When the storage host is not configured,
/// embedded images are left pointing at their remote URLs.
#[derive(Debug, Clone)]
pub struct ImageSettings {
    /// Storage host whose URLs are rewritten to local paths.
    pub host: String,
    /// Optional proxy endpoint keyed by the extracted image key; the original
    /// URL is fetched directly when absent.
    pub proxy_url: Option<Url>,
}

/// Resolved pipeline configuration — validated and ready to drive all stages.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub batch_size: u32,
    pub num_batches: u32,
    /// `None` when the download is skipped; the input file is read as-is.
    pub api: Option<ApiSettings>,
    pub images: Option<ImageSettings>,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and
    /// environment.
    ///
    /// Environment: `TOPICS_API_URL` / `TOPICS_API_KEY` (required unless
    /// `--skip-download`), `TOPICS_IMAGE_HOST` / `TOPICS_IMAGE_PROXY_URL`
    /// (optional).
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api = if cli.skip_download {
            None
        } else {
            let base_url = std::env::var("TOPICS_API_URL").map_err(|_| {
                AppError::MissingConfiguration(
                    "TOPICS_API_URL environment variable not set".to_string(),
                )
            })?;
            let api_key = std::env::var("TOPICS_API_KEY").map_err(|_| {
                AppError::MissingConfiguration(
                    "TOPICS_API_KEY environment variable not set".to_string(),
                )
            })?;
            Some(ApiSettings { base_url, api_key })
        };

        let images = match std::env::var("TOPICS_IMAGE_HOST") {
            Ok(host) if !host.trim().is_empty() => {
                let proxy_url = match std::env::var("TOPICS_IMAGE_PROXY_URL") {
                    Ok(raw) if !raw.trim().is_empty() => Some(Url::parse(&raw)?),
                    _ => None,
                };
                Some(ImageSettings {
                    host: host.trim().to_string(),
                    proxy_url,
                })
            }
            _ => None,
        };

        Ok(PipelineConfig {
            input_file: PathBuf::from(cli.input),
            output_dir: PathBuf::from(cli.out),
            batch_size: cli.batch_size,
            num_batches: cli.num_batches,
            api,
            images,
        })
    }
}
