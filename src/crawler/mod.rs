//! Crawler module - the ingestion pipeline
//!
//! This module contains the crawl pipeline, including:
//! - HTTP fetching with a fixed user agent and timeout
//! - Paginated posting-URL discovery
//! - Posting page parsing into structured listings
//! - Overall crawl coordination and rate limiting

mod coordinator;
mod discovery;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use discovery::discover_listing_urls;
pub use fetcher::{build_http_client, fetch_page, USER_AGENT};
pub use parser::{parse_listing_page, DEFAULT_CATEGORY, DEFAULT_POSITION_TYPE};

use crate::config::Config;
use crate::JobhoundError;

/// Runs a complete ingestion pass
///
/// This is the main entry point for crawling. It will:
/// 1. Open the configured storage database
/// 2. Discover posting URLs from the paginated search results
/// 3. Fetch and parse each posting
/// 4. Upsert every parsed listing into the store
///
/// Returns the number of listings successfully stored.
pub async fn crawl(config: Config) -> Result<usize, JobhoundError> {
    run_crawl(config).await
}
