//! Inventory sitemap discovery
//!
//! For one dealer site the locator:
//! 1. Visits the homepage, failing fast on a block page
//! 2. Reads robots.txt for diagnostics
//! 3. Probes the known inventory sitemap path
//! 4. Probes fallback paths in order, requiring inventory keywords
//!
//! The first candidate that validates wins. A timeout or transport error on a
//! candidate only fails that candidate.

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pacing::{warmup_duration, Pacer};
use crate::crawler::parser::{is_block_page, parse_homepage};
use crate::feed::{FeedDocument, Rejection};
use crate::robots::fetch_robots;
use crate::url::join_site_path;
use crate::SeederError;
use std::time::Duration;

/// Number of content characters shown in debug previews
const PREVIEW_CHARS: usize = 200;

/// A site-relative location probed for a sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapCandidate {
    /// Path appended to the site's base URL
    pub path: String,

    /// Position in the probe order (0 is probed first)
    pub priority: u32,

    /// Whether the content must mention an inventory keyword
    pub requires_relevance: bool,

    /// Timeout for this probe
    pub timeout: Duration,
}

/// Builds the ordered candidate list from configuration
///
/// The primary path comes first with no relevance check, followed by the
/// fallback paths in configured order.
pub fn build_candidates(config: &Config) -> Vec<SitemapCandidate> {
    let mut candidates = vec![SitemapCandidate {
        path: config.sitemap.primary_path.clone(),
        priority: 0,
        requires_relevance: false,
        timeout: config.crawler.primary_timeout(),
    }];

    for (i, path) in config.sitemap.fallback_paths.iter().enumerate() {
        candidates.push(SitemapCandidate {
            path: path.clone(),
            priority: (i + 1) as u32,
            requires_relevance: true,
            timeout: config.crawler.fallback_timeout(),
        });
    }

    candidates
}

/// Finds a site's inventory sitemap
#[derive(Debug, Clone)]
pub struct SitemapLocator {
    candidates: Vec<SitemapCandidate>,
    relevance_keywords: Vec<String>,
    block_markers: Vec<String>,
    homepage_timeout: Duration,
    robots_timeout: Duration,
    warmup_min_ms: u64,
    warmup_max_ms: u64,
    robots_agent: String,
}

impl SitemapLocator {
    pub fn new(config: &Config) -> Self {
        let robots_agent = config
            .fetch
            .user_agent
            .split('/')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("*")
            .to_string();

        Self {
            candidates: build_candidates(config),
            relevance_keywords: config.sitemap.relevance_keywords.clone(),
            block_markers: config.sitemap.block_markers.clone(),
            homepage_timeout: config.crawler.homepage_timeout(),
            robots_timeout: config.crawler.robots_timeout(),
            warmup_min_ms: config.crawler.warmup_min_ms,
            warmup_max_ms: config.crawler.warmup_max_ms,
            robots_agent,
        }
    }

    pub fn candidates(&self) -> &[SitemapCandidate] {
        &self.candidates
    }

    /// Locates the first valid sitemap for `base_url`
    ///
    /// # Returns
    ///
    /// * `Ok(FeedDocument)` - The first candidate that validated
    /// * `Err(SeederError::SiteBlocked)` - The homepage is a block page
    /// * `Err(SeederError::Fetch)` - The homepage could not be fetched
    /// * `Err(SeederError::NotFound)` - Every candidate failed
    pub async fn locate(
        &self,
        fetcher: &dyn PageFetcher,
        pacer: &dyn Pacer,
        base_url: &str,
    ) -> Result<FeedDocument, SeederError> {
        self.warm_up(fetcher, pacer, base_url).await?;
        self.log_robots(fetcher, base_url).await;

        for candidate in &self.candidates {
            if let Some(feed) = self.probe(fetcher, base_url, candidate).await {
                return Ok(feed);
            }
        }

        Err(SeederError::NotFound {
            url: base_url.to_string(),
        })
    }

    /// Visits the homepage and checks for a block page
    async fn warm_up(
        &self,
        fetcher: &dyn PageFetcher,
        pacer: &dyn Pacer,
        base_url: &str,
    ) -> Result<(), SeederError> {
        tracing::debug!("Visiting main page {}", base_url);
        let response = fetcher.fetch(base_url, self.homepage_timeout).await?;

        let homepage = match url::Url::parse(&response.final_url) {
            Ok(page_url) => parse_homepage(&response.content, &page_url),
            Err(_) => match url::Url::parse(base_url) {
                Ok(page_url) => parse_homepage(&response.content, &page_url),
                Err(e) => return Err(SeederError::UrlParse(e)),
            },
        };

        if is_block_page(homepage.title.as_deref(), &self.block_markers) {
            tracing::warn!(
                "Main page blocked: {}",
                homepage.title.as_deref().unwrap_or_default()
            );
            return Err(SeederError::SiteBlocked {
                url: base_url.to_string(),
            });
        }

        tracing::info!(
            "Main page loaded: {}",
            homepage.title.as_deref().unwrap_or("(untitled)")
        );

        if !homepage.sitemap_refs.is_empty() {
            let shown: Vec<&str> = homepage
                .sitemap_refs
                .iter()
                .take(3)
                .map(String::as_str)
                .collect();
            tracing::debug!("Sitemap references on main page: {}", shown.join(", "));
        }

        pacer
            .pause(warmup_duration(self.warmup_min_ms, self.warmup_max_ms))
            .await;

        Ok(())
    }

    /// Logs what robots.txt says about sitemaps; never fails
    async fn log_robots(&self, fetcher: &dyn PageFetcher, base_url: &str) {
        let Some(robots) = fetch_robots(fetcher, base_url, self.robots_timeout).await else {
            return;
        };

        let declared = robots.sitemaps();
        if !declared.is_empty() {
            tracing::debug!("Sitemaps in robots.txt: {}", declared.join(", "));
        }

        if let Some(primary) = self.candidates.first() {
            let primary_url = join_site_path(base_url, &primary.path);
            if !robots.is_allowed(&primary_url, &self.robots_agent) {
                tracing::debug!("robots.txt disallows {}", primary_url);
            }
        }

        if let Some(delay) = robots.crawl_delay(&self.robots_agent) {
            tracing::debug!("robots.txt requests crawl delay of {}s", delay);
        }
    }

    /// Probes one candidate, returning the feed if it validates
    async fn probe(
        &self,
        fetcher: &dyn PageFetcher,
        base_url: &str,
        candidate: &SitemapCandidate,
    ) -> Option<FeedDocument> {
        let candidate_url = join_site_path(base_url, &candidate.path);
        tracing::info!("Checking sitemap candidate: {}", candidate_url);

        let response = match fetcher.fetch(&candidate_url, candidate.timeout).await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Candidate {} failed: {}", candidate.path, e);
                return None;
            }
        };

        tracing::debug!("Sitemap response status: {}", response.status);
        if !response.is_ok() {
            return None;
        }

        tracing::debug!("Content preview: {}...", preview(&response.content));

        let keywords = candidate
            .requires_relevance
            .then_some(self.relevance_keywords.as_slice());

        match FeedDocument::accept(&candidate_url, response.content, keywords) {
            Ok(feed) => {
                tracing::info!("Found sitemap at {}", candidate_url);
                Some(feed)
            }
            Err(Rejection::MissingFeedRoot) => {
                tracing::debug!("{} is reachable but is not a sitemap", candidate_url);
                None
            }
            Err(Rejection::NotInventory) => {
                tracing::debug!("{} has no inventory content", candidate_url);
                None
            }
        }
    }
}

fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}
