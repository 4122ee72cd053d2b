use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for vdp-seeder
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults of the original dealer-site tooling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    pub sitemap: SitemapConfig,
    pub datasets: DatasetConfig,
}

/// Pacing and timeout configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Pause between sites (seconds); zero disables the pause
    pub delay_seconds: u64,

    /// Lower bound of the randomized pause after the homepage visit (milliseconds)
    pub warmup_min_ms: u64,

    /// Upper bound of the randomized pause after the homepage visit (milliseconds)
    pub warmup_max_ms: u64,

    /// Timeout for the homepage warm-up request (seconds)
    pub homepage_timeout_secs: u64,

    /// Timeout for the primary inventory sitemap probe (seconds)
    pub primary_timeout_secs: u64,

    /// Timeout for each fallback sitemap probe (seconds)
    pub fallback_timeout_secs: u64,

    /// Timeout for the robots.txt request (seconds)
    pub robots_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_seconds: 3,
            warmup_min_ms: 2000,
            warmup_max_ms: 4000,
            homepage_timeout_secs: 30,
            primary_timeout_secs: 30,
            fallback_timeout_secs: 15,
            robots_timeout_secs: 15,
        }
    }
}

impl CrawlerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }

    pub fn homepage_timeout(&self) -> Duration {
        Duration::from_secs(self.homepage_timeout_secs)
    }

    pub fn primary_timeout(&self) -> Duration {
        Duration::from_secs(self.primary_timeout_secs)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout_secs)
    }

    pub fn robots_timeout(&self) -> Duration {
        Duration::from_secs(self.robots_timeout_secs)
    }
}

/// Fetch engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Whether the fetch engine runs without a visible window
    pub headless: bool,

    /// User agent presented to dealer sites
    pub user_agent: String,

    /// Value of the Accept-Language header
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

/// Sitemap candidate and content rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SitemapConfig {
    /// Known inventory sitemap path, probed first without a relevance check
    pub primary_path: String,

    /// Fallback paths, probed in order
    pub fallback_paths: Vec<String>,

    /// Terms that mark a fallback sitemap as inventory-related
    pub relevance_keywords: Vec<String>,

    /// Title fragments that mark the homepage as a block page
    pub block_markers: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            primary_path: "/dealer-inspire-inventory/inventory_sitemap.xml".to_string(),
            fallback_paths: vec![
                "/sitemap.xml".to_string(),
                "/sitemaps/inventory.xml".to_string(),
                "/inventory-sitemap.xml".to_string(),
                "/sitemap_index.xml".to_string(),
            ],
            relevance_keywords: vec![
                "inventory".to_string(),
                "vehicle".to_string(),
                "vdp".to_string(),
            ],
            block_markers: vec!["403".to_string(), "Forbidden".to_string()],
        }
    }
}

/// Input and output file locations for the normal and test datasets
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DatasetConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub test_input: PathBuf,
    pub test_output: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input/stellantis.txt"),
            output: PathBuf::from("output/stellantis-vdp.txt"),
            test_input: PathBuf::from("input/test-site.txt"),
            test_output: PathBuf::from("output/test-vdp.txt"),
        }
    }
}

impl DatasetConfig {
    /// Returns the (input, output) pair for the selected dataset
    pub fn select(&self, test: bool) -> (PathBuf, PathBuf) {
        if test {
            (self.test_input.clone(), self.test_output.clone())
        } else {
            (self.input.clone(), self.output.clone())
        }
    }
}
