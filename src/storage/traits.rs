//! Storage trait and error types
//!
//! This module defines the trait interface for the listing store and its
//! associated error types.

use crate::listing::JobListing;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for the job listing store
///
/// The store owns the primary `jobs` table and its derived full-text index.
/// Every write goes through [`upsert_listing`](Storage::upsert_listing),
/// which keeps the index entry coupled to the primary row.
pub trait Storage {
    /// Inserts a listing, or updates the existing row with the same
    /// requisition ID in place
    ///
    /// On update, the title, location, pay range, description,
    /// qualifications, tech keywords, and scraped-at timestamp are replaced;
    /// url, category, position type, and deadline keep their first-seen
    /// values. The matching full-text index entry is replaced in the same
    /// transaction, so a listing and its index entry never diverge.
    fn upsert_listing(&mut self, listing: &JobListing) -> StorageResult<()>;

    /// Gets a listing by requisition ID
    fn get_by_req_id(&self, req_id: &str) -> StorageResult<Option<JobListing>>;

    /// Gets all listings, most recently scraped first
    fn list_all(&self) -> StorageResult<Vec<JobListing>>;

    /// Searches listings by free-text query
    ///
    /// The primary path queries the full-text index with a prefix match on
    /// the last term, ranked by the index's native relevance ordering. If the
    /// index query fails for any reason the store falls back to a
    /// case-insensitive substring match over title, description, tech
    /// keywords, and location, most recently scraped first. Callers should
    /// route empty queries to [`list_all`](Storage::list_all) instead.
    fn search(&self, query: &str) -> StorageResult<Vec<JobListing>>;

    /// Counts the stored listings
    fn count_listings(&self) -> StorageResult<u64>;

    /// Rebuilds the full-text index from the primary table
    ///
    /// Repair path for an index that has diverged from the primary data
    /// (e.g. after a crash between schema changes).
    fn rebuild_search_index(&mut self) -> StorageResult<()>;
}
