//! Configuration module for vdp-seeder
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file section falls back to built-in defaults, so running without a
//! config file is supported.
//!
//! # Example
//!
//! ```no_run
//! use vdp_seeder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seeder.toml")).unwrap();
//! println!("Delay between sites: {}s", config.crawler.delay_seconds);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DatasetConfig, FetchConfig, SitemapConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
