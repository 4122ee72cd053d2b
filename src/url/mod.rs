//! URL handling module for vdp-seeder
//!
//! Sitemap candidates are site-relative paths; this module turns them into
//! absolute URLs against a dealer's base URL.

/// Builds the absolute URL of a site-relative path
///
/// Any trailing slashes on the base URL are dropped before the path is
/// appended, so `https://a.com/` and `https://a.com` give the same result.
/// Paths on the base are kept: `https://a.com/shop` + `/sitemap.xml` gives
/// `https://a.com/shop/sitemap.xml`.
///
/// # Examples
///
/// ```
/// use vdp_seeder::url::join_site_path;
///
/// assert_eq!(
///     join_site_path("https://dealer.example.com/", "/robots.txt"),
///     "https://dealer.example.com/robots.txt"
/// );
/// ```
pub fn join_site_path(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_without_trailing_slash() {
        assert_eq!(
            join_site_path("https://a.example.com", "/sitemap.xml"),
            "https://a.example.com/sitemap.xml"
        );
    }

    #[test]
    fn test_join_with_trailing_slashes() {
        assert_eq!(
            join_site_path("https://a.example.com//", "/sitemap.xml"),
            "https://a.example.com/sitemap.xml"
        );
    }

    #[test]
    fn test_join_keeps_base_path() {
        assert_eq!(
            join_site_path("http://a.example.com/store/", "/robots.txt"),
            "http://a.example.com/store/robots.txt"
        );
    }
}
