//! Configuration loading and validation
//!
//! Jobhound is configured by a small TOML file naming the careers-site
//! search URL to crawl and the database the listings land in.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlConfig, OutputConfig};
pub use validation::validate;
