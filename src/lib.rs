//! vdp-seeder: inventory sitemap discovery for dealer websites
//!
//! This crate locates each dealer site's vehicle-inventory sitemap, pulls the
//! first vehicle detail page (VDP) URL out of it, and writes the resulting
//! seed list for downstream scraping. Sites are processed one at a time with
//! a polite delay between them.

pub mod config;
pub mod crawler;
pub mod feed;
pub mod output;
pub mod robots;
pub mod sites;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for vdp-seeder operations
#[derive(Debug, Error)]
pub enum SeederError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Site blocked: {url}")]
    SiteBlocked { url: String },

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("No accessible sitemap found for {url}")]
    NotFound { url: String },

    #[error("Sitemap at {url} lists no page locations")]
    EmptyFeed { url: String },

    #[error("Failed to initialize fetch capability: {0}")]
    CapabilityInit(String),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::SiteState,
        to: state::SiteState,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a single fetch through the fetch capability
///
/// These never abort a batch on their own: the sitemap locator treats them
/// as a failed candidate and moves on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid path in config: {0}")]
    InvalidPath(String),
}

/// Result type alias for vdp-seeder operations
pub type Result<T> = std::result::Result<T, SeederError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, HttpFetcher, PageFetcher, SitemapLocator};
pub use output::{BatchReport, FileResultWriter, ResultWriter, VdpRecord};
pub use sites::{parse_site_list, SiteDescriptor};
pub use state::SiteState;
