//! Jobhound main entry point
//!
//! This is the command-line interface for the Jobhound job listing crawler.

use clap::Parser;
use std::path::PathBuf;
use jobhound::config::load_config_with_hash;
use jobhound::crawler::crawl;
use tracing_subscriber::EnvFilter;

/// Jobhound: a careers-site job listing crawler
///
/// Jobhound walks an employer's paginated careers search results, fetches
/// each job posting, tags it with technology keywords, and stores the
/// structured listings in a searchable SQLite database.
#[derive(Parser, Debug)]
#[command(name = "jobhound")]
#[command(version = "0.1.0")]
#[command(about = "A careers-site job listing crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show database statistics and exit
    #[arg(long, conflicts_with_all = ["search", "seed"])]
    stats: bool,

    /// Search stored listings and exit
    #[arg(long, value_name = "QUERY", conflicts_with_all = ["stats", "seed"])]
    search: Option<String>,

    /// Load listings from a JSON file instead of crawling
    #[arg(long, value_name = "FILE", conflicts_with_all = ["stats", "search"])]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.stats {
        handle_stats(&config)?;
    } else if let Some(query) = cli.search.as_deref() {
        handle_search(&config, query)?;
    } else if let Some(seed_file) = cli.seed.as_deref() {
        handle_seed(&config, seed_file)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jobhound=info,warn"),
            1 => EnvFilter::new("jobhound=debug,info"),
            2 => EnvFilter::new("jobhound=trace,debug"),
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

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &jobhound::Config) -> Result<(), Box<dyn std::error::Error>> {
    use std::path::Path;
    use jobhound::storage::Storage;
    use jobhound::SqliteStorage;

    println!("Database: {}\n", config.output.database_path);

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    let total = storage.count_listings()?;
    println!("Total listings: {}", total);

    if let Some(latest) = storage.list_all()?.first() {
        println!("Most recent scrape: {}", latest.scraped_at);
    }

    Ok(())
}

/// Handles the --search mode: queries stored listings and prints matches
fn handle_search(config: &jobhound::Config, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    use std::path::Path;
    use jobhound::storage::Storage;
    use jobhound::SqliteStorage;

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    // An empty query lists everything rather than hitting the search index
    let results = if query.trim().is_empty() {
        storage.list_all()?
    } else {
        storage.search(query)?
    };

    for listing in &results {
        println!("{}  {}  [{}]", listing.req_id, listing.title, listing.location);
        if !listing.tech_keywords.is_empty() {
            println!("    keywords: {}", listing.tech_keywords);
        }
        println!("    {}", listing.url);
    }

    println!("\n{} listing(s) matched", results.len());

    Ok(())
}

/// Handles the --seed mode: loads listings from a JSON file into the store
fn handle_seed(
    config: &jobhound::Config,
    seed_file: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    use jobhound::seed::{load_seed_file, seed_listings};
    use jobhound::storage::open_storage;

    println!("Seeding from: {}", seed_file.display());

    let listings = load_seed_file(seed_file)?;
    let mut storage = open_storage(std::path::Path::new(&config.output.database_path))?;
    let count = seed_listings(&mut storage, &listings);

    println!("✓ Seeded {} of {} listings", count, listings.len());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: jobhound::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting crawl of {}", config.crawl.base_url);
    tracing::info!(
        "Max pages: {}, request delay: {}ms",
        config.crawl.max_pages,
        config.crawl.request_delay_ms
    );

    // Run the crawler
    match crawl(config).await {
        Ok(saved) => {
            tracing::info!("Crawl completed successfully ({} listings saved)", saved);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
