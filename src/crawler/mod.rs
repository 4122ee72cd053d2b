//! Crawler module for sitemap discovery and batch processing
//!
//! This module contains the core logic, including:
//! - The fetch capability boundary and its HTTP implementation
//! - Homepage inspection for block pages
//! - Ordered sitemap candidate probing
//! - Request pacing
//! - Overall batch coordination

mod coordinator;
mod fetcher;
mod locator;
mod pacing;
mod parser;

pub use coordinator::{run_batch, Coordinator};
pub use fetcher::{build_http_client, FetchResponse, HttpFetcher, PageFetcher};
pub use locator::{build_candidates, SitemapCandidate, SitemapLocator};
pub use pacing::{warmup_duration, Pacer, TokioPacer};
pub use parser::{is_block_page, parse_homepage, ParsedHomepage};
