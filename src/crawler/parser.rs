//! Homepage inspection
//!
//! This module handles parsing the dealer homepage fetched during warm-up to
//! extract:
//! - The page title (used for block-page detection)
//! - Links that reference sitemap XML files (diagnostic output only)

use scraper::{Html, Selector};
use url::Url;

/// Extracted information from a dealer homepage
#[derive(Debug, Clone, Default)]
pub struct ParsedHomepage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Absolute URLs of linked `*sitemap*.xml` files, in document order
    pub sitemap_refs: Vec<String>,
}

/// Parses homepage HTML for its title and sitemap references
///
/// # Example
///
/// ```
/// use vdp_seeder::crawler::parse_homepage;
/// use url::Url;
///
/// let html = r#"<html><head><title>Dealer</title></head><body><a href="/sitemap.xml">Map</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_homepage(html, &base_url);
/// assert_eq!(parsed.title, Some("Dealer".to_string()));
/// assert_eq!(parsed.sitemap_refs, vec!["https://example.com/sitemap.xml".to_string()]);
/// ```
pub fn parse_homepage(html: &str, base_url: &Url) -> ParsedHomepage {
    let document = Html::parse_document(html);

    ParsedHomepage {
        title: extract_title(&document),
        sitemap_refs: extract_sitemap_refs(&document, base_url),
    }
}

/// Returns true if the title marks the page as a block page
///
/// A page with no title is never treated as blocked.
pub fn is_block_page(title: Option<&str>, markers: &[String]) -> bool {
    match title {
        Some(title) => markers.iter().any(|m| title.contains(m.as_str())),
        None => false,
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts links to sitemap XML files from `<a>` and `<link>` elements
fn extract_sitemap_refs(document: &Html, base_url: &Url) -> Vec<String> {
    let mut refs = Vec::new();

    let selector = match Selector::parse("a[href], link[href]") {
        Ok(s) => s,
        Err(_) => return refs,
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !looks_like_sitemap(href) {
            continue;
        }

        if let Some(absolute_url) = resolve_link(href, base_url) {
            if !refs.contains(&absolute_url) {
                refs.push(absolute_url);
            }
        }
    }

    refs
}

fn looks_like_sitemap(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    match lower.find("sitemap") {
        Some(pos) => lower[pos..].ends_with(".xml") || lower[pos..].contains(".xml?"),
        None => false,
    }
}

/// Resolves a link href to an absolute HTTP(S) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
