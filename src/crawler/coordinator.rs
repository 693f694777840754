//! Crawl coordinator - one full ingestion pass
//!
//! Drives discovery, per-posting fetch, parse, and upsert in sequence, one
//! request at a time with a fixed delay in between. Failures are contained
//! at the smallest unit: a bad listing page is logged and skipped, a failed
//! upsert lowers the saved count, and the pass itself never aborts because
//! of a single posting.

use crate::config::Config;
use crate::crawler::discovery::discover_listing_urls;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_listing_page;
use crate::storage::{save_listing, SqliteStorage};
use crate::JobhoundError;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

/// Main crawl coordinator
pub struct Coordinator {
    config: Config,
    client: Client,
    storage: SqliteStorage,
}

impl Coordinator {
    /// Creates a new coordinator, opening the configured database
    pub fn new(config: Config) -> Result<Self, JobhoundError> {
        let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
        let client = build_http_client()?;

        Ok(Self {
            config,
            client,
            storage,
        })
    }

    /// Runs one full ingestion pass
    ///
    /// Discovers posting URLs up to the configured page cap, then fetches,
    /// parses, and upserts each one in order. Returns the number of listings
    /// successfully stored.
    pub async fn run(&mut self) -> Result<usize, JobhoundError> {
        let delay = Duration::from_millis(self.config.crawl.request_delay_ms);

        let urls = discover_listing_urls(
            &self.client,
            &self.config.crawl.base_url,
            self.config.crawl.max_pages,
            delay,
        )
        .await;

        tracing::info!("Discovered {} job posting URLs", urls.len());

        let mut saved = 0;
        for url in &urls {
            let Some(body) = fetch_page(&self.client, url).await else {
                tracing::warn!("Skipping {}: fetch failed", url);
                tokio::time::sleep(delay).await;
                continue;
            };

            match parse_listing_page(&body, url) {
                Ok(listing) => {
                    if save_listing(&mut self.storage, &listing) {
                        saved += 1;
                        tracing::info!("Saved: {} ({})", listing.title, listing.req_id);
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                }
            }

            tokio::time::sleep(delay).await;
        }

        tracing::info!("Crawl complete: {} listings saved", saved);
        Ok(saved)
    }

    /// Gives the coordinator's storage handle back to the caller
    pub fn into_storage(self) -> SqliteStorage {
        self.storage
    }
}

/// Runs a complete crawl with a fresh coordinator
pub async fn run_crawl(config: Config) -> Result<usize, JobhoundError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
