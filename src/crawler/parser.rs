//! Job posting page parser
//!
//! Turns one fetched HTML document into a structured [`JobListing`]. Careers
//! pages are loosely formatted, so every field is extracted best-effort with
//! its own fallback literal; a page missing every recognizable element still
//! parses into a listing built entirely from fallbacks.

use crate::keywords::extract_keywords;
use crate::listing::JobListing;
use crate::JobhoundError;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Category applied to every posting from this source
pub const DEFAULT_CATEGORY: &str = "Engineering & Software Development";

/// Position type applied to every posting from this source
pub const DEFAULT_POSITION_TYPE: &str = "Regular";

/// Hard cap on stored description length, in characters
const DESCRIPTION_CAP: usize = 2000;

/// Hard cap on stored qualifications length, in characters
const QUALIFICATIONS_CAP: usize = 1000;

/// Requisition IDs look like "2025-116940": four digits, dash, digits
static REQ_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}-\d+)").expect("req id pattern is valid"));

static PAY_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)pay range\s*").expect("pay label pattern is valid"));

/// The qualifications section runs from a Required/Minimum Qualifications
/// marker to the next section marker ("Preferred...", "What you...") or the
/// end of the text
static QUALIFICATIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(?:required|minimum)\s*qualifications?[:\s]*(.*?)(?:preferred|what you|$)")
        .expect("qualifications pattern is valid")
});

static DEADLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)deadline[:\s]*(\d{4}-\d{2}-\d{2})").expect("deadline pattern is valid"));

/// Parses a single job posting page into a listing
///
/// Each field is extracted independently; a field that cannot be located
/// gets its documented fallback value rather than failing the page. The
/// keyword tagging runs over the untruncated title + description +
/// qualifications text, and the description/qualifications caps are applied
/// afterwards.
///
/// # Arguments
///
/// * `html` - The raw page markup
/// * `url` - The URL the page was fetched from
pub fn parse_listing_page(html: &str, url: &str) -> Result<JobListing, JobhoundError> {
    let document = Html::parse_document(html);

    let title = first_text(&document, &parse_selector("h1", url)?)
        .unwrap_or_else(|| "Unknown Position".to_string());

    let req_id = extract_req_id(&document, url)?
        .unwrap_or_else(|| format!("UNKNOWN-{}", Utc::now().timestamp()));

    let pay_range =
        extract_pay_range(&document, url)?.unwrap_or_else(|| "Not Specified".to_string());

    let location = first_text(&document, &parse_selector("span.job-location", url)?)
        .unwrap_or_else(|| "Multiple Locations".to_string());

    let description = extract_description(&document, url)?;
    let qualifications = extract_qualifications(&description);

    let deadline = DEADLINE_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    // Keyword extraction sees the full text; truncation happens below
    let combined = format!("{} {} {}", title, description, qualifications);
    let tech_keywords = extract_keywords(&combined);

    Ok(JobListing {
        req_id,
        title,
        location,
        category: DEFAULT_CATEGORY.to_string(),
        pay_range,
        position_type: DEFAULT_POSITION_TYPE.to_string(),
        deadline,
        description: truncate_chars(&description, DESCRIPTION_CAP),
        qualifications: truncate_chars(&qualifications, QUALIFICATIONS_CAP),
        url: url.to_string(),
        tech_keywords,
        scraped_at: Utc::now().to_rfc3339(),
    })
}

/// Extracts the requisition ID from a dedicated element or a free-text label
///
/// Tries the `span.job-id` element first, then any text node mentioning
/// "Requisition ID"; either way the candidate text must contain a
/// four-digit-dash-digits token to count.
fn extract_req_id(document: &Html, url: &str) -> Result<Option<String>, JobhoundError> {
    let selector = parse_selector("span.job-id", url)?;
    if let Some(text) = first_text(document, &selector) {
        if let Some(caps) = REQ_ID_RE.captures(&text) {
            return Ok(Some(caps[1].to_string()));
        }
    }

    for node in document.root_element().text() {
        if node.contains("Requisition ID") {
            if let Some(caps) = REQ_ID_RE.captures(node) {
                return Ok(Some(caps[1].to_string()));
            }
        }
    }

    Ok(None)
}

/// Extracts the pay range, stripping the "Pay range" label text itself
fn extract_pay_range(document: &Html, url: &str) -> Result<Option<String>, JobhoundError> {
    let selector = parse_selector("span.job-salary", url)?;

    let raw = first_text(document, &selector).or_else(|| {
        document
            .root_element()
            .text()
            .find(|node| node.contains("Pay range"))
            .map(|node| node.to_string())
    });

    Ok(raw
        .map(|text| PAY_LABEL_RE.replace_all(&text, "").trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Extracts the posting body from the first matching content container
fn extract_description(document: &Html, url: &str) -> Result<String, JobhoundError> {
    let primary = parse_selector("div.ats-description", url)?;
    let alternate = parse_selector("div.job-description", url)?;

    Ok(first_text(document, &primary)
        .or_else(|| first_text(document, &alternate))
        .unwrap_or_default())
}

/// Extracts the qualifications section from already-extracted description text
fn extract_qualifications(description: &str) -> String {
    QUALIFICATIONS_RE
        .captures(description)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

/// Returns the trimmed text of the first element matching the selector
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_selector(selectors: &str, url: &str) -> Result<Selector, JobhoundError> {
    Selector::parse(selectors).map_err(|e| JobhoundError::HtmlParse {
        url: url.to_string(),
        message: format!("bad selector '{}': {}", selectors, e),
    })
}

/// Truncates a string to at most `max` characters
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
