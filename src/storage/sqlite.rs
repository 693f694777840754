//! SQLite storage implementation
//!
//! This module provides the SQLite-backed implementation of the Storage
//! trait, including the FTS5 search path and its substring fallback.

use crate::listing::JobListing;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::JobhoundError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Column list shared by the plain listing queries
const LISTING_COLUMNS: &str = "req_id, title, location, category, pay_range, position_type, \
     deadline, description, qualifications, url, tech_keywords, scraped_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(JobhoundError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, JobhoundError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, JobhoundError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Queries the full-text index with a prefix match on the last term
    ///
    /// Quote characters are stripped from the query before it reaches the
    /// index, so user input cannot change the match expression's structure.
    fn search_index(&self, query: &str) -> StorageResult<Vec<JobListing>> {
        let sanitized: String = query.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
        let match_expr = format!("{}*", sanitized.trim());

        let mut stmt = self.conn.prepare(
            "SELECT j.req_id, j.title, j.location, j.category, j.pay_range, j.position_type,
                    j.deadline, j.description, j.qualifications, j.url, j.tech_keywords, j.scraped_at
             FROM jobs j
             INNER JOIN jobs_fts fts ON j.id = fts.rowid
             WHERE jobs_fts MATCH ?1
             ORDER BY rank",
        )?;

        let listings = stmt
            .query_map(params![match_expr], listing_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(listings)
    }

    /// Fallback case-insensitive substring search over the indexed fields
    fn search_substring(&self, query: &str) -> StorageResult<Vec<JobListing>> {
        let pattern = format!("%{}%", query.to_lowercase());

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LISTING_COLUMNS} FROM jobs
             WHERE lower(title) LIKE ?1
                OR lower(description) LIKE ?1
                OR lower(tech_keywords) LIKE ?1
                OR lower(location) LIKE ?1
             ORDER BY scraped_at DESC"
        ))?;

        let listings = stmt
            .query_map(params![pattern], listing_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(listings)
    }
}

impl Storage for SqliteStorage {
    fn upsert_listing(&mut self, listing: &JobListing) -> StorageResult<()> {
        let tx = self.conn.transaction()?;

        // url, category, position_type, and deadline keep their first-seen
        // values; everything that can change between crawls is replaced.
        tx.execute(
            "INSERT INTO jobs (req_id, title, location, category, pay_range, position_type,
                               deadline, description, qualifications, url, tech_keywords, scraped_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(req_id) DO UPDATE SET
                 title = excluded.title,
                 location = excluded.location,
                 pay_range = excluded.pay_range,
                 description = excluded.description,
                 qualifications = excluded.qualifications,
                 tech_keywords = excluded.tech_keywords,
                 scraped_at = excluded.scraped_at",
            params![
                listing.req_id,
                listing.title,
                listing.location,
                listing.category,
                listing.pay_range,
                listing.position_type,
                listing.deadline,
                listing.description,
                listing.qualifications,
                listing.url,
                listing.tech_keywords,
                listing.scraped_at,
            ],
        )?;

        let row_id: i64 = tx.query_row(
            "SELECT id FROM jobs WHERE req_id = ?1",
            params![listing.req_id],
            |row| row.get(0),
        )?;

        // Replace the matching index entry in the same transaction
        tx.execute("DELETE FROM jobs_fts WHERE rowid = ?1", params![row_id])?;
        tx.execute(
            "INSERT INTO jobs_fts (rowid, title, description, qualifications, tech_keywords, location)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row_id,
                listing.title,
                listing.description,
                listing.qualifications,
                listing.tech_keywords,
                listing.location,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn get_by_req_id(&self, req_id: &str) -> StorageResult<Option<JobListing>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LISTING_COLUMNS} FROM jobs WHERE req_id = ?1"
        ))?;

        let listing = stmt
            .query_row(params![req_id], listing_from_row)
            .optional()?;

        Ok(listing)
    }

    fn list_all(&self) -> StorageResult<Vec<JobListing>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LISTING_COLUMNS} FROM jobs ORDER BY scraped_at DESC"
        ))?;

        let listings = stmt
            .query_map([], listing_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(listings)
    }

    fn search(&self, query: &str) -> StorageResult<Vec<JobListing>> {
        match self.search_index(query) {
            Ok(listings) => Ok(listings),
            Err(e) => {
                tracing::warn!(
                    "Full-text search failed ({}), falling back to substring match",
                    e
                );
                self.search_substring(query)
            }
        }
    }

    fn count_listings(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn rebuild_search_index(&mut self) -> StorageResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM jobs_fts", [])?;
        tx.execute(
            "INSERT INTO jobs_fts (rowid, title, description, qualifications, tech_keywords, location)
             SELECT id, title, description, qualifications, tech_keywords, location FROM jobs",
            [],
        )?;

        tx.commit()?;
        Ok(())
    }
}

/// Maps a row selected with [`LISTING_COLUMNS`] into a JobListing
fn listing_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<JobListing> {
    Ok(JobListing {
        req_id: row.get(0)?,
        title: row.get(1)?,
        location: row.get(2)?,
        category: row.get(3)?,
        pay_range: row.get(4)?,
        position_type: row.get(5)?,
        deadline: row.get(6)?,
        description: row.get(7)?,
        qualifications: row.get(8)?,
        url: row.get(9)?,
        tech_keywords: row.get(10)?,
        scraped_at: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing(req_id: &str, title: &str, scraped_at: &str) -> JobListing {
        JobListing {
            req_id: req_id.to_string(),
            title: title.to_string(),
            location: "Austin, TX".to_string(),
            category: "Engineering & Software Development".to_string(),
            pay_range: "USD $120,000.00 - $150,000.00 / Year".to_string(),
            position_type: "Regular".to_string(),
            deadline: "2026-01-15".to_string(),
            description: "Build trading systems in Java with Kafka.".to_string(),
            qualifications: "5+ years Java, SQL, REST APIs".to_string(),
            url: format!("https://careers.example.com/job/austin/{}", req_id),
            tech_keywords: "api, java, kafka, rest, sql, trading".to_string(),
            scraped_at: scraped_at.to_string(),
        }
    }

    #[test]
    fn test_create_in_memory() {
        assert!(SqliteStorage::new_in_memory().is_ok());
    }

    #[test]
    fn test_upsert_and_get() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let listing = sample_listing("2025-100001", "Software Engineer", "2026-08-01T10:00:00Z");

        storage.upsert_listing(&listing).unwrap();

        let fetched = storage.get_by_req_id("2025-100001").unwrap().unwrap();
        assert_eq!(fetched, listing);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        assert!(storage.get_by_req_id("2025-999999").unwrap().is_none());
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        let first = sample_listing("2025-100001", "Software Engineer", "2026-08-01T10:00:00Z");
        storage.upsert_listing(&first).unwrap();

        let mut second = sample_listing(
            "2025-100001",
            "Senior Software Engineer",
            "2026-08-02T10:00:00Z",
        );
        second.pay_range = "USD $150,000.00 - $180,000.00 / Year".to_string();
        storage.upsert_listing(&second).unwrap();

        assert_eq!(storage.count_listings().unwrap(), 1);

        let fetched = storage.get_by_req_id("2025-100001").unwrap().unwrap();
        assert_eq!(fetched.title, "Senior Software Engineer");
        assert_eq!(fetched.pay_range, "USD $150,000.00 - $180,000.00 / Year");
        assert_eq!(fetched.scraped_at, "2026-08-02T10:00:00Z");
    }

    #[test]
    fn test_upsert_keeps_first_seen_fields() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        let first = sample_listing("2025-100001", "Software Engineer", "2026-08-01T10:00:00Z");
        storage.upsert_listing(&first).unwrap();

        let mut second = first.clone();
        second.url = "https://careers.example.com/job/elsewhere".to_string();
        second.deadline = "2027-01-01".to_string();
        second.category = "Something Else".to_string();
        second.position_type = "Intern".to_string();
        storage.upsert_listing(&second).unwrap();

        let fetched = storage.get_by_req_id("2025-100001").unwrap().unwrap();
        assert_eq!(fetched.url, first.url);
        assert_eq!(fetched.deadline, first.deadline);
        assert_eq!(fetched.category, first.category);
        assert_eq!(fetched.position_type, first.position_type);
    }

    #[test]
    fn test_req_id_uniqueness() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        for (req_id, title) in [
            ("2025-100001", "Engineer A"),
            ("2025-100002", "Engineer B"),
            ("2025-100001", "Engineer A v2"),
            ("2025-100002", "Engineer B v2"),
        ] {
            let listing = sample_listing(req_id, title, "2026-08-01T10:00:00Z");
            storage.upsert_listing(&listing).unwrap();
        }

        let all = storage.list_all().unwrap();
        assert_eq!(all.len(), 2);

        let mut req_ids: Vec<&str> = all.iter().map(|l| l.req_id.as_str()).collect();
        req_ids.sort_unstable();
        req_ids.dedup();
        assert_eq!(req_ids.len(), 2);
    }

    #[test]
    fn test_list_all_ordered_by_scraped_at_desc() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        storage
            .upsert_listing(&sample_listing("2025-1", "Old", "2026-08-01T10:00:00Z"))
            .unwrap();
        storage
            .upsert_listing(&sample_listing("2025-3", "New", "2026-08-03T10:00:00Z"))
            .unwrap();
        storage
            .upsert_listing(&sample_listing("2025-2", "Mid", "2026-08-02T10:00:00Z"))
            .unwrap();

        let all = storage.list_all().unwrap();
        let titles: Vec<&str> = all.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_search_finds_keyword() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage
            .upsert_listing(&sample_listing(
                "2025-100001",
                "Java Engineer",
                "2026-08-01T10:00:00Z",
            ))
            .unwrap();

        let results = storage.search("kafka").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].req_id, "2025-100001");
    }

    #[test]
    fn test_search_prefix_matches_last_term() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage
            .upsert_listing(&sample_listing(
                "2025-100001",
                "Java Engineer",
                "2026-08-01T10:00:00Z",
            ))
            .unwrap();

        let results = storage.search("tradi").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_strips_quotes() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage
            .upsert_listing(&sample_listing(
                "2025-100001",
                "Java Engineer",
                "2026-08-01T10:00:00Z",
            ))
            .unwrap();

        let results = storage.search("\"java\"").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_punctuation_query_uses_fallback() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let mut listing = sample_listing("2025-100001", "C++ Engineer", "2026-08-01T10:00:00Z");
        listing.tech_keywords = "c++, trading".to_string();
        storage.upsert_listing(&listing).unwrap();

        // "c++*" is not a valid FTS5 expression, so this exercises the
        // substring fallback end to end through the public search path.
        let results = storage.search("c++").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].req_id, "2025-100001");
    }

    #[test]
    fn test_search_results_are_subset_of_list_all() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        for i in 1..=5 {
            storage
                .upsert_listing(&sample_listing(
                    &format!("2025-10000{}", i),
                    &format!("Engineer {}", i),
                    "2026-08-01T10:00:00Z",
                ))
                .unwrap();
        }

        let all_ids: Vec<String> = storage
            .list_all()
            .unwrap()
            .into_iter()
            .map(|l| l.req_id)
            .collect();

        for query in ["java", "engineer", "c++", "nosuchterm", "   "] {
            for result in storage.search(query).unwrap() {
                assert!(
                    all_ids.contains(&result.req_id),
                    "search({:?}) returned a row missing from list_all",
                    query
                );
            }
        }
    }

    #[test]
    fn test_substring_fallback_directly() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage
            .upsert_listing(&sample_listing(
                "2025-100001",
                "Java Engineer",
                "2026-08-01T10:00:00Z",
            ))
            .unwrap();

        let results = storage.search_substring("AUSTIN").unwrap();
        assert_eq!(results.len(), 1);

        let results = storage.search_substring("nosuchterm").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_rebuild_search_index() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage
            .upsert_listing(&sample_listing(
                "2025-100001",
                "Java Engineer",
                "2026-08-01T10:00:00Z",
            ))
            .unwrap();

        // Simulate a diverged index
        storage.conn.execute("DELETE FROM jobs_fts", []).unwrap();
        assert!(storage.search("kafka").unwrap().is_empty());

        storage.rebuild_search_index().unwrap();
        assert_eq!(storage.search("kafka").unwrap().len(), 1);
    }
}
