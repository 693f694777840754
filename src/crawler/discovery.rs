//! Posting URL discovery
//!
//! Walks the paginated search-results endpoint and collects candidate
//! posting URLs. Page 1 is the base URL unmodified; later pages append
//! `/<page-number>`. A fetch failure or non-200 response stops pagination
//! early and whatever was gathered so far is returned — discovery never
//! fails past this boundary.

use crate::crawler::fetcher::fetch_page;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Discovers job posting URLs from the paginated search results
///
/// Returns a deduplicated list in first-seen order. A fixed delay is applied
/// between page fetches.
///
/// # Arguments
///
/// * `client` - The HTTP client to fetch with
/// * `base_url` - The search-results URL (page 1)
/// * `max_pages` - Upper bound on result pages to walk
/// * `delay` - Inter-page delay
pub async fn discover_listing_urls(
    client: &Client,
    base_url: &str,
    max_pages: u32,
    delay: Duration,
) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let base = Url::parse(base_url).ok();

    for page in 1..=max_pages {
        let page_url = if page > 1 {
            format!("{}/{}", base_url, page)
        } else {
            base_url.to_string()
        };

        tracing::info!("Fetching listing page {}: {}", page, page_url);

        let body = match fetch_page(client, &page_url).await {
            Some(body) => body,
            None => {
                tracing::warn!("Listing page {} unavailable, stopping pagination", page);
                break;
            }
        };

        let links = extract_listing_links(&body, base.as_ref());
        tracing::info!("Found {} job links on page {}", links.len(), page);

        for link in links {
            if !urls.contains(&link) {
                urls.push(link);
            }
        }

        tokio::time::sleep(delay).await;
    }

    urls
}

/// Extracts posting URLs from a search-results page
///
/// Keeps anchors whose target contains the `/job/` posting path, resolving
/// relative hrefs against the base URL. Order of appearance is preserved;
/// deduplication is the caller's concern.
fn extract_listing_links(html: &str, base: Option<&Url>) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !href.contains("/job/") {
            continue;
        }

        if href.starts_with("http://") || href.starts_with("https://") {
            links.push(href.to_string());
        } else if let Some(base) = base {
            match base.join(href) {
                Ok(resolved) => links.push(resolved.to_string()),
                Err(e) => tracing::debug!("Skipping unresolvable href '{}': {}", href, e),
            }
        }
    }

    links
}
