//! Sitemap documents
//!
//! This module decides whether fetched content is a usable inventory
//! sitemap and extracts the first vehicle detail page from it.

mod scanner;

pub use scanner::{first_location, has_feed_root};

/// Why a fetched document was not accepted as a sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No `<urlset>` or `<sitemapindex>` element
    MissingFeedRoot,
    /// Sitemap present but none of the inventory keywords appear
    NotInventory,
}

/// A sitemap document that passed validation
///
/// Only [`FeedDocument::accept`] constructs one, so holding a `FeedDocument`
/// means the validity rules held for its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    source_url: String,
    content: String,
}

impl FeedDocument {
    /// Validates fetched content as a sitemap
    ///
    /// The document must contain a feed root element. When `relevance_keywords`
    /// is `Some`, at least one keyword must also occur in the content; the
    /// primary inventory path passes `None` and skips that check.
    pub fn accept(
        source_url: &str,
        content: String,
        relevance_keywords: Option<&[String]>,
    ) -> Result<Self, Rejection> {
        if !has_feed_root(&content) {
            return Err(Rejection::MissingFeedRoot);
        }

        if let Some(keywords) = relevance_keywords {
            if !keywords.iter().any(|k| content.contains(k.as_str())) {
                return Err(Rejection::NotInventory);
            }
        }

        Ok(Self {
            source_url: source_url.to_string(),
            content,
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Extracts the first page URL listed in a sitemap
///
/// `None` means the sitemap was found but lists nothing usable.
pub fn extract_first_location(feed: &FeedDocument) -> Option<String> {
    first_location(feed.content())
}
