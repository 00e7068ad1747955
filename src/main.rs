//! Catalog-Harvest main entry point
//!
//! With no arguments the harvester walks its built-in catalog, resuming after
//! the last product stored in the database.

use anyhow::Context;
use catalog_harvest::browser::{FieldSelectors, HttpProductBrowser, LineCheckpoint};
use catalog_harvest::config::{load_config_or_default, Config};
use catalog_harvest::crawler::{build_http_client, Harvester, HttpPageSource, ListingWalker};
use catalog_harvest::output::{load_statistics, print_session_summary, print_statistics};
use catalog_harvest::state::ResumeCursor;
use catalog_harvest::storage::{ProductStore, SqliteStore};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a resumable product catalog walker
///
/// Walks a paginated catalog listing, extracts every product page it links
/// to, and stores one row per product. Interrupted runs pick up after the
/// last stored product.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version)]
#[command(about = "A resumable product catalog walker", long_about = None)]
struct Cli {
    /// Path to a TOML file overriding the built-in settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without harvesting
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let mut store = SqliteStore::new(Path::new(&config.output.database_path))
        .with_context(|| format!("Failed to open database {}", config.output.database_path))?;

    let result = if cli.stats {
        handle_stats(&store)
    } else {
        handle_harvest(&config, &mut store).await
    };

    match store.close() {
        Ok(()) => tracing::info!("Database connection closed"),
        Err(e) => tracing::error!("Failed to close database: {}", e),
    }

    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be harvested
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Harvest Dry Run ===\n");

    println!("Catalog:");
    println!("  Start URL: {}", config.site.start_url);
    println!("  Search segment: {}", config.site.search_segment);
    println!("  Page segment: {}", config.site.page_segment);
    println!("  Link attribute: {}", config.site.link_attribute);
    println!("  Pagination selector: {}", config.site.pagination_selector);
    println!("  Page delay: {}ms", config.site.page_delay_ms);
    println!("  Product type: {}", config.site.product_type);

    println!("\nExtraction selectors:");
    for (field, selector) in config.extraction.fields() {
        println!("  {}: {}", field, selector);
    }

    println!("\nUser agent: {}", config.user_agent.header_value());
    println!("Database: {}", config.output.database_path);
    println!(
        "Manual checkpoint: {}",
        if config.session.manual_checkpoint { "on" } else { "off" }
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(store: &SqliteStore) -> anyhow::Result<()> {
    let stats = load_statistics(store).context("Failed to read statistics")?;
    print_statistics(&stats);
    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config, store: &mut SqliteStore) -> anyhow::Result<()> {
    let cursor = ResumeCursor::from_store(&*store)?;
    match cursor.marker() {
        Some(marker) => {
            tracing::info!("Resuming from after product: {}", marker);
            tracing::info!(
                "Total products processed so far: {}",
                store.count_products()?
            );
        }
        None => tracing::info!("Starting fresh scrape"),
    }

    let client = build_http_client(&config.user_agent)?;
    let mut walker =
        ListingWalker::from_config(HttpPageSource::new(client.clone()), &config.site, cursor)?;

    let selectors = FieldSelectors::from_config(&config.extraction)?;
    let mut browser = HttpProductBrowser::new(client, selectors);
    let mut checkpoint = LineCheckpoint::stdin();

    let mut harvester = Harvester::new(
        store,
        &mut browser,
        &mut checkpoint,
        config.site.product_type.clone(),
    )?
    .with_manual_checkpoint(config.session.manual_checkpoint);

    let summary = harvester.run(&mut walker).await;
    print_session_summary(&summary);

    Ok(())
}
