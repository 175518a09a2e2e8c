// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::Path;
use topics2md::{
    append_run_entry, measure_run, payload, write_index, AppError, Article, ArticleAssembler,
    ArticleSource, CommandLineInput, DirectoryScanIndex, DocumentComposer, DocumentSink,
    ExportHttpClient, HttpImageFetcher, ImageResolver, PipelineConfig, SyncEngine, SyncOutcome,
    SyncStatus, CHANGELOG_FILE_NAME,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("topics2md.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the pipeline: fetch → compose each article → sync → journal.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let mut pipeline = TopicsToMarkdown::new(config)?;

    let articles = pipeline.fetch().await?;
    println!("📄 Found {} articles", articles.len());

    let mut outcomes = Vec::new();
    for (i, article) in articles.iter().enumerate() {
        let position = i + 1;
        // One malformed article must not abort the batch.
        match process_article(&mut pipeline, article, position).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                log::warn!(
                    "Skipping article {} ('{}'): {}",
                    position,
                    article.title,
                    err
                );
            }
        }
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    append_run_entry(
        Path::new(CHANGELOG_FILE_NAME),
        &config.output_dir,
        &timestamp,
        &outcomes,
    )?;
    write_index(&config.output_dir, &outcomes)?;

    report_completion(&articles, &outcomes);
    Ok(())
}

async fn process_article(
    pipeline: &mut TopicsToMarkdown<'_>,
    article: &Article,
    position: usize,
) -> Result<SyncOutcome, AppError> {
    let document = pipeline.compose(article).await?;
    let outcome = pipeline.sink(article, position, &document)?;

    let label = match outcome.status {
        SyncStatus::New => "NEW",
        SyncStatus::Updated => "updated",
        SyncStatus::Unchanged => "no changes",
    };
    log::info!(
        "Processing article {} (ID: {}) - {}",
        position,
        outcome.article_id,
        label
    );
    Ok(outcome)
}

/// Reports completion to the user with run statistics.
fn report_completion(articles: &[Article], outcomes: &[SyncOutcome]) {
    let stats = measure_run(articles, outcomes);

    println!("📊 Processed {} articles", stats.total_articles);
    println!("🆕 New articles: {}", stats.new_articles);
    println!("🔄 Updated articles: {}", stats.updated_articles);
    println!("✅ Unchanged articles: {}", stats.unchanged_articles);
    println!("- Unique tags: {}", stats.unique_tags);
    println!("- Countries involved: {}", stats.unique_countries);
    println!("- Unique authors: {}", stats.unique_authors);
}

/// Orchestrates the export download, document composition and sync stages.
struct TopicsToMarkdown<'a> {
    config: &'a PipelineConfig,
    assembler: ArticleAssembler,
    engine: SyncEngine<DirectoryScanIndex>,
}

impl<'a> TopicsToMarkdown<'a> {
    fn new(config: &'a PipelineConfig) -> Result<Self, AppError> {
        let resolver = match &config.images {
            Some(settings) => {
                log::info!("Image localization enabled for host {}", settings.host);
                let fetcher = HttpImageFetcher::new(settings.proxy_url.clone())?;
                Some(ImageResolver::new(
                    settings.host.clone(),
                    &config.output_dir,
                    Box::new(fetcher),
                ))
            }
            None => None,
        };

        // Built once per run; every article lookup is then O(1).
        let index = DirectoryScanIndex::scan(&config.output_dir)?;
        log::info!("Found {} existing articles", index.len());

        Ok(Self {
            config,
            assembler: ArticleAssembler::new(resolver),
            engine: SyncEngine::new(&config.output_dir, index),
        })
    }
}

#[async_trait::async_trait]
impl ArticleSource for TopicsToMarkdown<'_> {
    async fn fetch(&self) -> Result<Vec<Article>, AppError> {
        if let Some(api) = &self.config.api {
            println!("🔄 Downloading export from API...");
            let client = ExportHttpClient::new(&api.base_url, &api.api_key)?;
            let fetched = client
                .download_to_file(
                    &self.config.input_file,
                    self.config.batch_size,
                    self.config.num_batches,
                )
                .await?;
            println!("✅ Downloaded {} articles", fetched);
        } else {
            log::info!(
                "Download skipped — reading {}",
                self.config.input_file.display()
            );
        }

        payload::load_export_file(&self.config.input_file)
    }
}

#[async_trait::async_trait]
impl DocumentComposer for TopicsToMarkdown<'_> {
    async fn compose(&mut self, article: &Article) -> Result<String, AppError> {
        self.assembler.assemble(article).await
    }
}

impl DocumentSink for TopicsToMarkdown<'_> {
    fn sink(
        &mut self,
        article: &Article,
        position: usize,
        document: &str,
    ) -> Result<SyncOutcome, AppError> {
        self.engine.sync_article(article, position, document)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| anyhow::anyhow!("Logging setup failed: {}", e))?;

    let config = PipelineConfig::resolve(cli).context("Could not resolve configuration")?;

    execute_pipeline(&config)
        .await
        .context("Conversion failed")?;

    println!("✅ All done!");
    Ok(())
}
