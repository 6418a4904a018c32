use anyhow::{Context, Result, bail};
use clap::Parser;
use headwire_common::observability::{LogConfig, init_logging};
use headwire_config::{HeadwireConfig, HeadwireConfigLoader};
use headwire_extract::rendered::RenderedExtractor;
use headwire_extract::static_page::StaticExtractor;
use headwire_extract::strategy::StrategySelector;
use headwire_extract::{HeadlinePipeline, NO_TITLE, NewsRecord, SiteAwareFetcher};
use headwire_http::PageClient;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Enrich a batch of news records with headlines extracted from their pages.
#[derive(Debug, Parser)]
#[command(name = "headwire", version)]
struct Cli {
    /// Batch file: a JSON object with a `results` array of records, each
    /// carrying at least a `url` field.
    input: PathBuf,

    /// Configuration file (YAML); environment variables win over it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write enriched output here instead of the configured results dir.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Echo log events to stderr in addition to the log file.
    #[arg(long)]
    verbose: bool,
}

/// Shape of an uploaded batch file.
#[derive(Debug, Deserialize)]
struct BatchFile {
    results: Vec<NewsRecord>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins)
    let mut loader = HeadwireConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let mut cfg: HeadwireConfig = loader.load()?;
    if let Some(dir) = cli.output_dir {
        cfg.output.results_dir = dir;
    }

    init_logging(LogConfig {
        emit_stderr: cli.verbose,
        ..LogConfig::default()
    })?;

    tracing::info!(input = %cli.input.display(), "processing batch file");

    let raw = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let batch: BatchFile = serde_json::from_str(&raw)
        .context("batch file must be a JSON object with a `results` array")?;

    let enriched = run_pipeline(&cfg, batch.results).await?;
    if enriched.is_empty() {
        bail!("no headlines extracted");
    }

    let out_path = persist_results(&cfg, &enriched)?;
    tracing::info!(path = %out_path.display(), "results written");
    println!("{}", out_path.display());

    Ok(())
}

async fn run_pipeline(cfg: &HeadwireConfig, records: Vec<NewsRecord>) -> Result<Vec<NewsRecord>> {
    let client = PageClient::new(cfg.extractor.accept_invalid_certs)?
        .with_timeout(cfg.extractor.request_timeout());

    let fetcher = SiteAwareFetcher::new(
        StrategySelector::new(cfg.extractor.render_hosts.clone()),
        StaticExtractor::new(client, cfg.extractor.request_timeout()),
        RenderedExtractor::new(
            cfg.extractor.headless,
            cfg.extractor.request_timeout(),
            cfg.output.debug_dir.clone(),
        ),
    );
    let pipeline = HeadlinePipeline::new(Arc::new(fetcher), cfg.extractor.clone());

    let record_count = records.len();
    let enriched = pipeline.enrich_all(records).await;
    let with_title = enriched
        .iter()
        .filter(|r| r.title().is_some_and(|t| t != NO_TITLE))
        .count();
    tracing::info!(records = record_count, with_title, "batch complete");

    Ok(enriched)
}

fn persist_results(cfg: &HeadwireConfig, enriched: &[NewsRecord]) -> Result<PathBuf> {
    std::fs::create_dir_all(&cfg.output.results_dir).with_context(|| {
        format!(
            "failed to create results directory {}",
            cfg.output.results_dir.display()
        )
    })?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H");
    let out_path = cfg
        .output
        .results_dir
        .join(format!("headlines_{stamp}.json"));
    let json = serde_json::to_string_pretty(enriched)?;
    std::fs::write(&out_path, json)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    Ok(out_path)
}
