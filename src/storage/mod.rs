//! Storage module for persisting job listings
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Listing upserts keyed by requisition ID
//! - The FTS5 search index and its substring fallback
//! - Read operations for the API layer (get, list, search)

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::listing::JobListing;
use crate::JobhoundError;

use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, JobhoundError> {
    SqliteStorage::new(path)
}

/// Saves a listing, reporting success as a boolean
///
/// This is the upsert boundary used by batch ingestion: a storage failure is
/// caught and logged here so a single bad listing never aborts the rest of
/// the batch.
pub fn save_listing(store: &mut dyn Storage, listing: &JobListing) -> bool {
    match store.upsert_listing(listing) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Error saving listing {}: {}", listing.req_id, e);
            false
        }
    }
}
