//! Robots.txt handling module
//!
//! robots.txt is fetched once per site during discovery, purely for
//! diagnostics: declared sitemaps, a disallow on the inventory path, and a
//! crawl delay longer than ours are logged. Nothing here gates probing.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::PageFetcher;
use crate::url::join_site_path;
use std::time::Duration;

/// Fetches and parses robots.txt for a site
///
/// # Returns
///
/// * `Some(ParsedRobots)` - robots.txt answered with HTTP 200
/// * `None` - Any other status or a fetch failure
pub async fn fetch_robots(
    fetcher: &dyn PageFetcher,
    base_url: &str,
    timeout: Duration,
) -> Option<ParsedRobots> {
    let robots_url = join_site_path(base_url, "/robots.txt");

    match fetcher.fetch(&robots_url, timeout).await {
        Ok(response) if response.is_ok() => Some(ParsedRobots::from_content(&response.content)),
        Ok(response) => {
            tracing::debug!("robots.txt returned status {}", response.status);
            None
        }
        Err(e) => {
            tracing::debug!("Could not access robots.txt: {}", e);
            None
        }
    }
}
