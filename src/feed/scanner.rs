//! Tolerant sitemap tokenizer
//!
//! Sitemaps in the wild are frequently served with stray HTML wrappers,
//! namespace prefixes, CDATA sections and truncated tails. The scanner walks
//! quick-xml events in document order. On a syntax error it resumes at the
//! next `<` after the failure, so one bad construct (an IE conditional, a
//! bare `<` in text) does not hide the rest of the document.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

/// Local element names that open a sitemap document
const FEED_ROOTS: [&[u8]; 2] = [b"urlset", b"sitemapindex"];

/// Raw markers that count as a feed root even when the tokenizer missed them
const FEED_ROOT_MARKERS: [&str; 2] = ["<urlset", "<sitemapindex"];

/// Local element name of a page location entry
const LOCATION: &[u8] = b"loc";

fn reader_for(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;
    reader
}

/// Event reader that skips past syntax errors instead of stopping
struct TolerantReader<'a> {
    xml: &'a str,
    offset: usize,
    reader: Reader<&'a [u8]>,
}

impl<'a> TolerantReader<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            xml,
            offset: 0,
            reader: reader_for(xml),
        }
    }

    /// Returns the next event, or `None` at end of input
    fn next_event(&mut self) -> Option<Event<'a>> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Eof) => return None,
                Ok(event) => return Some(event),
                Err(e) => {
                    // Resume strictly after the start of the bad markup
                    let bad_markup =
                        usize::try_from(self.reader.error_position()).unwrap_or(usize::MAX);
                    let failed_at = self.offset.saturating_add(bad_markup).saturating_add(1);
                    tracing::trace!("Sitemap tokenizer error at byte {}: {}", failed_at - 1, e);

                    // '<' is ASCII, so its index is always a char boundary
                    let next = self
                        .xml
                        .as_bytes()
                        .get(failed_at..)?
                        .iter()
                        .position(|b| *b == b'<')?;
                    self.offset = failed_at + next;
                    self.reader = reader_for(&self.xml[self.offset..]);
                }
            }
        }
    }
}

/// Returns true if the document contains a `<urlset>` or `<sitemapindex>` element
///
/// Elements are found through the tokenizer, which understands namespace
/// prefixes. If it finds none, a literal `<urlset` or `<sitemapindex` in
/// the raw text still counts, since markup the tokenizer cannot make sense
/// of can swallow the tag.
pub fn has_feed_root(xml: &str) -> bool {
    let mut reader = TolerantReader::new(xml);

    while let Some(event) = reader.next_event() {
        if let Event::Start(e) | Event::Empty(e) = event {
            if FEED_ROOTS.contains(&e.local_name().as_ref()) {
                return true;
            }
        }
    }

    FEED_ROOT_MARKERS.iter().any(|marker| xml.contains(marker))
}

/// Returns the text of the first `<loc>` element in document order
///
/// Only the first location entry is considered. If it is empty, the result
/// is `None` rather than a later entry. A `loc` counts only when it carries
/// the same namespace prefix as the feed root, so extension entries such as
/// `<image:loc>` are skipped.
pub fn first_location(xml: &str) -> Option<String> {
    let mut reader = TolerantReader::new(xml);
    let mut root_prefix: Option<Vec<u8>> = None;
    let mut in_loc = false;
    let mut text = String::new();

    while let Some(event) = reader.next_event() {
        match event {
            Event::Start(e) => {
                if FEED_ROOTS.contains(&e.local_name().as_ref()) {
                    root_prefix = e.name().prefix().map(|p| p.as_ref().to_vec());
                } else if is_page_location(e.name(), root_prefix.as_deref()) {
                    in_loc = true;
                    text.clear();
                }
            }
            Event::Empty(e) => {
                if is_page_location(e.name(), root_prefix.as_deref()) {
                    return None;
                }
            }
            Event::Text(e) => {
                if in_loc {
                    let decoded = match e.unescape() {
                        Ok(unescaped) => unescaped.into_owned(),
                        Err(_) => String::from_utf8_lossy(&e).into_owned(),
                    };
                    text.push_str(&decoded);
                }
            }
            Event::CData(e) => {
                if in_loc {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(e) => {
                if in_loc && e.local_name().as_ref() == LOCATION {
                    return non_empty(&text);
                }
            }
            _ => {}
        }
    }

    // Unterminated <loc> at end of input
    if in_loc {
        non_empty(&text)
    } else {
        None
    }
}

fn is_page_location(name: QName<'_>, root_prefix: Option<&[u8]>) -> bool {
    name.local_name().as_ref() == LOCATION && name.prefix().map(|p| p.into_inner()) == root_prefix
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#;
        assert!(has_feed_root(xml));
    }

    #[test]
    fn test_detects_sitemapindex() {
        let xml = r#"<sitemapindex><sitemap><loc>https://a.example.com/s1.xml</loc></sitemap></sitemapindex>"#;
        assert!(has_feed_root(xml));
    }

    #[test]
    fn test_detects_prefixed_root() {
        let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9"><sm:url><sm:loc>https://a.example.com/x</sm:loc></sm:url></sm:urlset>"#;
        assert!(has_feed_root(xml));
        assert_eq!(first_location(xml).as_deref(), Some("https://a.example.com/x"));
    }

    #[test]
    fn test_detects_root_inside_html_wrapper() {
        let html = r#"<html><head><meta charset="utf-8"></head><body><div><urlset><url><loc>https://a.example.com/v</loc></url></urlset></div></body></html>"#;
        assert!(has_feed_root(html));
        assert_eq!(first_location(html).as_deref(), Some("https://a.example.com/v"));
    }

    #[test]
    fn test_plain_html_has_no_root() {
        let html = "<html><head><title>Home</title></head><body><p>Welcome</p></body></html>";
        assert!(!has_feed_root(html));
    }

    #[test]
    fn test_escaped_marker_text_is_not_a_root() {
        let html = "<html><body><pre>&lt;urlset&gt;</pre></body></html>";
        assert!(!has_feed_root(html));
    }

    #[test]
    fn test_first_location_in_document_order() {
        let xml = r#"<urlset>
  <url><loc>https://a.example.com/vdp/1</loc></url>
  <url><loc>https://a.example.com/vdp/2</loc></url>
  <url><loc>https://a.example.com/vdp/1</loc></url>
</urlset>"#;
        assert_eq!(first_location(xml).as_deref(), Some("https://a.example.com/vdp/1"));
    }

    #[test]
    fn test_location_whitespace_and_entities() {
        let xml = "<urlset><url><loc>\n   https://a.example.com/vdp?id=1&amp;trim=2  \n</loc></url></urlset>";
        assert_eq!(
            first_location(xml).as_deref(),
            Some("https://a.example.com/vdp?id=1&trim=2")
        );
    }

    #[test]
    fn test_location_in_cdata() {
        let xml = "<urlset><url><loc><![CDATA[https://a.example.com/vdp/9]]></loc></url></urlset>";
        assert_eq!(first_location(xml).as_deref(), Some("https://a.example.com/vdp/9"));
    }

    #[test]
    fn test_no_locations() {
        assert_eq!(first_location("<urlset></urlset>"), None);
        assert_eq!(first_location(""), None);
    }

    #[test]
    fn test_empty_first_location_wins() {
        let xml = "<urlset><url><loc></loc></url><url><loc>https://a.example.com/2</loc></url></urlset>";
        assert_eq!(first_location(xml), None);
    }

    #[test]
    fn test_truncated_document_keeps_earlier_location() {
        let xml = "<urlset><url><loc>https://a.example.com/1</loc></url><url><loc>https://a.exa";
        assert_eq!(first_location(xml).as_deref(), Some("https://a.example.com/1"));
    }

    #[test]
    fn test_sitemapindex_first_location_is_child_sitemap() {
        let xml = "<sitemapindex><sitemap><loc>https://a.example.com/inventory-1.xml</loc></sitemap></sitemapindex>";
        assert_eq!(
            first_location(xml).as_deref(),
            Some("https://a.example.com/inventory-1.xml")
        );
    }

    #[test]
    fn test_root_after_bare_angle_bracket() {
        let html = "<html><body>price < 5000 <urlset><url><loc>https://a.example.com/inventory/1</loc></url></urlset></body></html>";
        assert!(has_feed_root(html));
        assert_eq!(
            first_location(html).as_deref(),
            Some("https://a.example.com/inventory/1")
        );
    }

    #[test]
    fn test_root_after_conditional_comment_markup() {
        let html = "<html><body><![if !IE]><p>modern</p><![endif]><urlset><url><loc>https://a.example.com/vdp/5</loc></url></urlset></body></html>";
        assert!(has_feed_root(html));
        assert_eq!(first_location(html).as_deref(), Some("https://a.example.com/vdp/5"));
    }

    #[test]
    fn test_image_location_skipped() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <image:image><image:loc>https://a.example.com/img.jpg</image:loc></image:image>
    <loc>https://a.example.com/vdp/7</loc>
  </url>
</urlset>"#;
        assert_eq!(first_location(xml).as_deref(), Some("https://a.example.com/vdp/7"));
    }
}
