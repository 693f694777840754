//! HTTP fetcher
//!
//! A single rate-limited GET wrapper used by both the listing-page discovery
//! and the per-posting fetch step. Non-200 responses and transport errors
//! are both "no result" at this layer; callers decide whether that means
//! stop paginating or skip one posting.

use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Browser-like user agent sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Per-request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Builds the HTTP client used for all crawl requests
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, returning the body on a 200 response
///
/// Any other outcome (non-200 status, timeout, connection failure) is logged
/// at debug level and collapses to `None`.
pub async fn fetch_page(client: &Client, url: &str) -> Option<String> {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if status != StatusCode::OK {
                tracing::debug!("GET {} returned status {}", url, status);
                return None;
            }

            match response.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::debug!("Failed to read body from {}: {}", url, e);
                    None
                }
            }
        }
        Err(e) => {
            tracing::debug!("Request to {} failed: {}", url, e);
            None
        }
    }
}
