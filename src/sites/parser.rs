use super::{SiteDescriptor, DEFAULT_LABEL};
use std::path::Path;

const FIELD_DELIMITER: char = '|';

/// Parses a single site line
///
/// Returns `None` for blank lines and lines that do not start with
/// `http://` or `https://`, including lines with leading whitespace.
/// Skipping is the recovery for malformed input, so there is no error case.
///
/// # Examples
///
/// ```
/// use vdp_seeder::sites::parse_site_line;
///
/// let site = parse_site_line("https://example.com|FORD").unwrap();
/// assert_eq!(site.base_url(), "https://example.com");
/// assert_eq!(site.label(), "FORD");
///
/// let site = parse_site_line("https://example.com").unwrap();
/// assert_eq!(site.label(), "UNK");
///
/// assert!(parse_site_line("# comment").is_none());
/// ```
pub fn parse_site_line(line: &str) -> Option<SiteDescriptor> {
    // The scheme must start the raw line; only trailing whitespace is dropped
    let line = line.trim_end();
    if !has_http_scheme(line) {
        return None;
    }

    let mut fields = line.split(FIELD_DELIMITER);
    let base_url = fields.next()?.trim();
    if !has_http_scheme(base_url) {
        return None;
    }

    let label = fields
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LABEL);

    Some(SiteDescriptor {
        base_url: base_url.to_string(),
        label: label.to_string(),
    })
}

/// Parses a whole site list, keeping input order
pub fn parse_site_list(content: &str) -> Vec<SiteDescriptor> {
    let sites: Vec<SiteDescriptor> = content.lines().filter_map(parse_site_line).collect();
    tracing::debug!("Parsed {} sites from {} lines", sites.len(), content.lines().count());
    sites
}

/// Reads and parses a site list file
pub fn load_site_list(path: &Path) -> std::io::Result<Vec<SiteDescriptor>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_site_list(&content))
}

fn has_http_scheme(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
