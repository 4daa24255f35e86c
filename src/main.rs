//! Verse-Harvest main entry point
//!
//! This is the command-line interface for the Verse-Harvest lyrics pipeline.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use verse_harvest::catalog::{build_http_client, discover_all, Fetcher};
use verse_harvest::config::{load_config_with_hash, Config};
use verse_harvest::ingest::{HttpWorkProvider, Ingestor, RecrawlGate, WorkProvider};
use verse_harvest::logsink::{LogAggregator, LogLevel, LogSender};
use verse_harvest::model::Artist;
use verse_harvest::pool::WorkerPool;
use verse_harvest::snapshot;
use verse_harvest::storage::{FsStore, ObjectStore};

/// Verse-Harvest: a lyrics catalog harvester
///
/// Discovers every artist in a partitioned catalog index, fetches each
/// artist's works from the lyrics provider, and stores them as JSON objects.
/// Re-running with --recrawl only ingests artists that are not yet stored.
#[derive(Parser, Debug)]
#[command(name = "verse-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvests a lyrics catalog into object storage", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the worker pool size from the config
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Discover a single partition key instead of the configured set
    #[arg(long, value_name = "KEY", conflicts_with = "input")]
    partition: Option<String>,

    /// Skip artists whose records already exist in storage
    #[arg(long)]
    recrawl: bool,

    /// Read the artist list from a snapshot file instead of discovering
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the discovered artist list to a snapshot file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Process-level startup logging; worker diagnostics go through the
    // aggregator funnel instead.
    setup_tracing(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) =
        load_config_with_hash(&cli.config).context("failed to load configuration")?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // CLI overrides
    if let Some(workers) = cli.workers {
        config.pool.workers = workers;
    }
    if let Some(partition) = &cli.partition {
        config.catalog.partitions = vec![partition.clone()];
    }

    run_harvest(config, &cli).await
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("verse_harvest=info,warn"),
            1 => EnvFilter::new("verse_harvest=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Maps CLI verbosity onto the aggregator's record filter
fn min_log_level(verbose: u8, quiet: bool) -> LogLevel {
    if quiet {
        LogLevel::Error
    } else if verbose == 0 {
        LogLevel::Info
    } else {
        LogLevel::Debug
    }
}

/// Runs the pipeline inside the lifetime of the log aggregator
///
/// Shutdown order matters: the pipeline (and with it every worker's sender)
/// finishes first, then the root sender is dropped, then the aggregator is
/// stopped so trailing records still reach the sink.
async fn run_harvest(config: Config, cli: &Cli) -> anyhow::Result<()> {
    let (aggregator, log) = LogAggregator::start(
        Box::new(std::io::stdout()),
        min_log_level(cli.verbose, cli.quiet),
    );

    let result = run_pipeline(config, cli, &log).await;

    drop(log);
    aggregator.stop().await;

    match &result {
        Ok(()) => tracing::info!("Harvest finished"),
        Err(e) => tracing::error!("Harvest failed: {}", e),
    }
    result
}

/// The pipeline proper: discover (or load), gate, ingest
async fn run_pipeline(config: Config, cli: &Cli, log: &LogSender) -> anyhow::Result<()> {
    let client = build_http_client(&config.fetch).context("failed to build HTTP client")?;
    let fetcher = Arc::new(Fetcher::new(client.clone(), config.fetch.max_attempts));
    let store: Arc<dyn ObjectStore> = Arc::new(FsStore::new(&config.storage.root));
    let pool = WorkerPool::new(config.pool.workers, log);

    // Artist list: snapshot or full discovery
    let artists: Vec<Artist> = if let Some(input) = &cli.input {
        let artists = snapshot::read_snapshot(input)?;
        log.info(format!(
            "loaded {} artists from {}",
            artists.len(),
            input.display()
        ));
        artists
    } else {
        let catalog = Arc::new(config.catalog.clone());
        discover_all(Arc::clone(&fetcher), catalog, &pool, log).await?
    };

    if let Some(output) = &cli.output {
        snapshot::write_snapshot(output, &artists)?;
        log.info(format!(
            "wrote {} artists to {}",
            artists.len(),
            output.display()
        ));
    }

    // Recrawl gate: drop artists that are already stored
    let artists = if cli.recrawl {
        let gate = RecrawlGate::new(Arc::clone(&store), config.recrawl.on_check_error);
        gate.filter_missing(artists, log)?
    } else {
        artists
    };

    if artists.is_empty() {
        log.info("nothing to ingest");
        return Ok(());
    }

    // Ingest every remaining artist through the pool
    let provider: Arc<dyn WorkProvider> =
        Arc::new(HttpWorkProvider::new(client, &config.provider));
    let ingestor = Arc::new(Ingestor::new(
        fetcher,
        provider,
        store,
        config.provider.max_attempts,
    ));

    let total = artists.len();
    let outcomes = pool
        .run(artists, move |mut artist: Artist, worker_log: LogSender| {
            let ingestor = Arc::clone(&ingestor);
            async move { ingestor.ingest(&mut artist, &worker_log).await }
        })
        .await?;

    let succeeded = outcomes
        .iter()
        .filter(|outcome| outcome.result.is_ok())
        .count();
    log.info(format!(
        "harvest complete: {} artists stored, {} failed",
        succeeded,
        total - succeeded
    ));

    Ok(())
}
