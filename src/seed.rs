//! Seed ingestion boundary
//!
//! A collaborator may supply a pre-built batch of listings to populate the
//! store without going through discovery and fetching. Seeded records use
//! the same upsert contract as crawled ones, so re-seeding or seeding over a
//! crawled database never duplicates a requisition ID.

use crate::listing::JobListing;
use crate::storage::{save_listing, Storage};
use crate::JobhoundError;
use std::path::Path;

/// Ingests a batch of pre-built listings through the upsert contract
///
/// Returns the number of listings successfully stored. A failed upsert is
/// logged and skipped, matching the crawl path's batch semantics.
pub fn seed_listings(store: &mut dyn Storage, listings: &[JobListing]) -> usize {
    let mut count = 0;

    for listing in listings {
        if save_listing(store, listing) {
            count += 1;
            tracing::info!("Seeded: {} ({})", listing.title, listing.req_id);
        }
    }

    tracing::info!("Seeded {} listings into the store", count);
    count
}

/// Loads a seed batch from a JSON file holding an array of listings
pub fn load_seed_file(path: &Path) -> Result<Vec<JobListing>, JobhoundError> {
    let content = std::fs::read_to_string(path)?;
    let listings: Vec<JobListing> = serde_json::from_str(&content)?;
    Ok(listings)
}
