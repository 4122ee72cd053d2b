//! vdp-seeder main entry point
//!
//! This is the command-line interface for the dealer inventory sitemap seeder.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vdp_seeder::config::{load_config_with_hash, validate, Config};
use vdp_seeder::crawler::{build_candidates, run_batch};
use vdp_seeder::output::{summary_line, FileResultWriter, WriteOutcome};
use vdp_seeder::sites::load_site_list;

/// vdp-seeder: find one vehicle detail page per dealer site
///
/// Reads a list of dealer sites, locates each site's inventory sitemap and
/// writes the first vehicle detail page URL per site as `<url>|<label>`.
#[derive(Parser, Debug)]
#[command(name = "vdp-seeder")]
#[command(version = "1.0.0")]
#[command(about = "Dealer inventory sitemap seeder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Use the test dataset instead of the normal one
    #[arg(long)]
    test: bool,

    /// Run the fetch engine with a visible window
    #[arg(long)]
    no_headless: bool,

    /// Seconds to wait between sites
    #[arg(long, value_name = "SECONDS")]
    delay: Option<u64>,

    /// Site list to read, overriding the dataset selection
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Result file to write, overriding the dataset selection
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Parse the site list and show the probe plan without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    let config = apply_overrides(config, &cli);
    validate(&config)?;

    let (default_input, default_output) = config.datasets.select(cli.test);
    let input = cli.input.clone().unwrap_or(default_input);
    let output = cli.output.clone().unwrap_or(default_output);

    if cli.dry_run {
        handle_dry_run(&config, &input, &output)?;
    } else {
        handle_batch(&config, &input, &output).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vdp_seeder=info,warn"),
            1 => EnvFilter::new("vdp_seeder=debug,info"),
            2 => EnvFilter::new("vdp_seeder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Folds command-line flags into a new configuration value
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(delay) = cli.delay {
        config.crawler.delay_seconds = delay;
    }
    if cli.no_headless {
        config.fetch.headless = false;
    }
    config
}

/// Handles the --dry-run mode: parses the site list and prints the probe plan
fn handle_dry_run(
    config: &Config,
    input: &std::path::Path,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let sites = load_site_list(input)?;

    println!("=== vdp-seeder Dry Run ===\n");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());
    println!("Headless mode: {}", config.fetch.headless);
    println!("Delay between sites: {}s", config.crawler.delay_seconds);

    println!("\nSitemap candidates:");
    for candidate in build_candidates(config) {
        println!(
            "  {}. {} (timeout {}s{})",
            candidate.priority,
            candidate.path,
            candidate.timeout.as_secs(),
            if candidate.requires_relevance {
                ", inventory keywords required"
            } else {
                ""
            }
        );
    }

    println!("\nSites ({}):", sites.len());
    for site in &sites {
        println!("  - {} [{}]", site.base_url(), site.label());
    }

    Ok(())
}

/// Handles the main batch operation
async fn handle_batch(
    config: &Config,
    input: &std::path::Path,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Input: {}", input.display());
    tracing::info!("Output: {}", output.display());
    tracing::info!("Headless mode: {}", config.fetch.headless);
    tracing::info!("Delay between sites: {}s", config.crawler.delay_seconds);

    let sites = match load_site_list(input) {
        Ok(sites) => sites,
        Err(e) => {
            tracing::error!("Failed to read site list {}: {}", input.display(), e);
            return Err(e.into());
        }
    };

    let writer = FileResultWriter::new(output);
    match run_batch(config, &sites, &writer).await {
        Ok((report, outcome)) => {
            // stdout, so the result is shown even with --quiet
            println!("{}", summary_line(&report));
            if let WriteOutcome::Written { count } = outcome {
                tracing::info!("Saved {} VDP URLs to {}", count, output.display());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Batch failed: {}", e);
            Err(e.into())
        }
    }
}
