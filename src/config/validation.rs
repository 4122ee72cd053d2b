use crate::config::types::{Config, CrawlerConfig, DatasetConfig, FetchConfig, SitemapConfig};
use crate::{ConfigError, ConfigResult};

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_sitemap_config(&config.sitemap)?;
    validate_dataset_config(&config.datasets)?;
    Ok(())
}

/// Validates pacing and timeouts
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.warmup_min_ms > config.warmup_max_ms {
        return Err(ConfigError::Validation(format!(
            "warmup_min_ms ({}) must not exceed warmup_max_ms ({})",
            config.warmup_min_ms, config.warmup_max_ms
        )));
    }

    for (name, value) in [
        ("homepage_timeout_secs", config.homepage_timeout_secs),
        ("primary_timeout_secs", config.primary_timeout_secs),
        ("fallback_timeout_secs", config.fallback_timeout_secs),
        ("robots_timeout_secs", config.robots_timeout_secs),
    ] {
        if value == 0 {
            return Err(ConfigError::Validation(format!(
                "{} must be >= 1, got 0",
                name
            )));
        }
    }

    Ok(())
}

/// Validates fetch engine settings
fn validate_fetch_config(config: &FetchConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates sitemap candidate paths and content rules
fn validate_sitemap_config(config: &SitemapConfig) -> ConfigResult<()> {
    validate_candidate_path(&config.primary_path)?;
    for path in &config.fallback_paths {
        validate_candidate_path(path)?;
    }

    // Fallback candidates need at least one keyword to ever be accepted
    if !config.fallback_paths.is_empty() && config.relevance_keywords.is_empty() {
        return Err(ConfigError::Validation(
            "relevance_keywords cannot be empty when fallback_paths are set".to_string(),
        ));
    }

    if config.relevance_keywords.iter().any(|k| k.is_empty()) {
        return Err(ConfigError::Validation(
            "relevance_keywords cannot contain empty entries".to_string(),
        ));
    }

    if config.block_markers.iter().any(|m| m.is_empty()) {
        return Err(ConfigError::Validation(
            "block_markers cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a candidate is an absolute path on the site
fn validate_candidate_path(path: &str) -> ConfigResult<()> {
    if path.is_empty() {
        return Err(ConfigError::InvalidPath(
            "Sitemap path cannot be empty".to_string(),
        ));
    }

    if !path.starts_with('/') {
        return Err(ConfigError::InvalidPath(format!(
            "Sitemap path '{}' must start with '/'",
            path
        )));
    }

    if path.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidPath(format!(
            "Sitemap path '{}' cannot contain whitespace",
            path
        )));
    }

    Ok(())
}

/// Validates dataset file locations
fn validate_dataset_config(config: &DatasetConfig) -> ConfigResult<()> {
    for (name, path) in [
        ("input", &config.input),
        ("output", &config.output),
        ("test_input", &config.test_input),
        ("test_output", &config.test_output),
    ] {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath(format!(
                "datasets.{} cannot be empty",
                name
            )));
        }
    }

    Ok(())
}
