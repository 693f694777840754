//! The canonical job listing record
//!
//! A `JobListing` is one posting from the careers site, keyed by its
//! requisition ID. Every field is a plain string so the record serializes as
//! a flat key-value mapping for the API layer that sits in front of the store.

use serde::{Deserialize, Serialize};

/// One job posting, keyed by requisition ID
///
/// Fields that cannot be recovered from the source page carry defined
/// fallback literals rather than being empty or null; see the parser for the
/// per-field fallbacks. `scraped_at` is an RFC 3339 timestamp set at
/// ingestion time and overwritten on every re-ingestion of the same
/// requisition ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    /// The site's unique requisition identifier, e.g. "2025-116940".
    /// Synthesized as "UNKNOWN-<unix-timestamp>" when unrecoverable.
    pub req_id: String,

    pub title: String,
    pub location: String,
    pub category: String,
    pub pay_range: String,
    pub position_type: String,

    /// Application deadline as "YYYY-MM-DD", or empty if not found
    pub deadline: String,

    /// Posting body text, capped at 2000 characters at ingestion time
    pub description: String,

    /// Required/minimum qualifications section of the description,
    /// capped at 1000 characters; empty if no section marker was found
    pub qualifications: String,

    /// The posting page URL this record was scraped from
    pub url: String,

    /// Comma-space-joined, alphabetically sorted technology keywords
    /// found in title + description + qualifications
    pub tech_keywords: String,

    /// RFC 3339 timestamp of the most recent ingestion of this record
    pub scraped_at: String,
}
