//! Database schema definitions
//!
//! This module contains the SQL schema for the Jobhound database: the `jobs`
//! table holding one row per requisition ID, and the `jobs_fts` full-text
//! index whose rowids mirror `jobs.id`.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per job posting, keyed by requisition ID
CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    req_id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    location TEXT NOT NULL,
    category TEXT NOT NULL,
    pay_range TEXT NOT NULL,
    position_type TEXT NOT NULL,
    deadline TEXT NOT NULL,
    description TEXT NOT NULL,
    qualifications TEXT NOT NULL,
    url TEXT NOT NULL,
    tech_keywords TEXT NOT NULL,
    scraped_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_jobs_req_id ON jobs(req_id);
CREATE INDEX IF NOT EXISTS idx_jobs_category ON jobs(category);
CREATE INDEX IF NOT EXISTS idx_jobs_scraped_at ON jobs(scraped_at);

-- Full-text index over the searchable posting fields.
-- Rows are keyed by the matching jobs.id and replaced on every upsert.
CREATE VIRTUAL TABLE IF NOT EXISTS jobs_fts USING fts5(
    title, description, qualifications, tech_keywords, location
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
