//! Batch coordinator - main orchestration logic
//!
//! This module contains the batch loop that drives every site through
//! discovery and extraction, including:
//! - Sequential processing in input order
//! - Per-site failure isolation
//! - The politeness delay between sites
//! - Releasing the fetch session and writing results once at the end

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::locator::SitemapLocator;
use crate::crawler::pacing::{Pacer, TokioPacer};
use crate::feed::extract_first_location;
use crate::output::{
    log_summary, BatchReport, FailureKind, ResultWriter, VdpRecord, WriteOutcome,
};
use crate::sites::SiteDescriptor;
use crate::state::{SiteProgress, SiteState};
use crate::SeederError;
use std::time::Duration;

/// Main batch coordinator structure
///
/// Owns the fetch capability for the whole run. Sites are handled strictly
/// one after another.
pub struct Coordinator<F: PageFetcher, P: Pacer = TokioPacer> {
    fetcher: F,
    pacer: P,
    locator: SitemapLocator,
    delay: Duration,
}

impl<F: PageFetcher, P: Pacer> Coordinator<F, P> {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    /// * `fetcher` - The fetch capability, already acquired
    /// * `pacer` - Used for every pause (warm-up and between sites)
    pub fn new(config: &Config, fetcher: F, pacer: P) -> Self {
        Self {
            fetcher,
            pacer,
            locator: SitemapLocator::new(config),
            delay: config.crawler.delay(),
        }
    }

    /// Runs the batch and writes the results
    ///
    /// The fetch session is closed after the last site whether or not the
    /// batch went smoothly. Results are written once, and only if at least one
    /// site succeeded.
    pub async fn run(
        &mut self,
        sites: &[SiteDescriptor],
        writer: &dyn ResultWriter,
    ) -> Result<(BatchReport, WriteOutcome), SeederError> {
        let report = self.process_all(sites).await;
        self.fetcher.close().await;

        log_summary(&report);

        if report.succeeded_count() == 0 {
            tracing::warn!("No VDP URLs found from any sites");
            return Ok((report, WriteOutcome::NothingToWrite));
        }

        writer.write_records(&report.records)?;
        let count = report.succeeded_count();
        tracing::info!("Saved {} VDP URLs", count);

        Ok((report, WriteOutcome::Written { count }))
    }

    /// Processes every site in order and returns the finished report
    pub async fn process_all(&self, sites: &[SiteDescriptor]) -> BatchReport {
        let mut report = BatchReport::new(sites.len());
        tracing::info!("Processing {} sites", sites.len());

        for (index, site) in sites.iter().enumerate() {
            tracing::info!(
                "[{}/{}] Processing: {}",
                index + 1,
                sites.len(),
                site.base_url()
            );

            if let Err(e) = self.run_site(site, &mut report).await {
                tracing::error!("Error processing {}: {}", site.base_url(), e);
            }
        }

        report.finish();
        report
    }

    /// Drives one site through `Pending -> Probing -> Delaying -> Done`
    async fn run_site(
        &self,
        site: &SiteDescriptor,
        report: &mut BatchReport,
    ) -> Result<(), SeederError> {
        let mut progress = SiteProgress::new();

        progress.advance(SiteState::Probing)?;
        match self.discover(site).await {
            Ok(record) => {
                tracing::info!("Found VDP URL: {}", record.vdp_url());
                report.record_success(record);
            }
            Err(e) => {
                let kind = FailureKind::from_error(&e);
                match kind {
                    FailureKind::EmptyFeed => {
                        tracing::warn!("No VDP URLs found in sitemap for {}", site.base_url());
                    }
                    FailureKind::NotFound | FailureKind::SiteBlocked => {
                        tracing::warn!("Skipping {}: {}", site.base_url(), e);
                    }
                    _ => tracing::error!("Error processing {}: {}", site.base_url(), e),
                }
                report.record_failure(site.base_url(), kind);
            }
        }

        if !self.delay.is_zero() {
            progress.advance(SiteState::Delaying)?;
            tracing::debug!("Waiting {:?} before next site", self.delay);
            self.pacer.pause(self.delay).await;
        }

        progress.advance(SiteState::Done)?;
        Ok(())
    }

    /// Locates the sitemap and extracts the first VDP
    async fn discover(&self, site: &SiteDescriptor) -> Result<VdpRecord, SeederError> {
        let feed = self
            .locator
            .locate(&self.fetcher, &self.pacer, site.base_url())
            .await?;

        extract_first_location(&feed)
            .and_then(|vdp_url| VdpRecord::new(vdp_url, site.label()))
            .ok_or_else(|| SeederError::EmptyFeed {
                url: feed.source_url().to_string(),
            })
    }
}

/// Runs a complete batch with the HTTP fetcher
///
/// This function:
/// 1. Acquires the fetch session (failure aborts before any site)
/// 2. Processes every site sequentially
/// 3. Closes the session
/// 4. Writes the results if any site succeeded
///
/// # Example
///
/// ```no_run
/// use vdp_seeder::config::Config;
/// use vdp_seeder::crawler::run_batch;
/// use vdp_seeder::output::FileResultWriter;
/// use vdp_seeder::sites::parse_site_list;
///
/// # async fn example() -> Result<(), vdp_seeder::SeederError> {
/// let config = Config::default();
/// let sites = parse_site_list("https://example.com|FORD");
/// let writer = FileResultWriter::new("output/vdp.txt");
/// let (report, _outcome) = run_batch(&config, &sites, &writer).await?;
/// println!("{}/{}", report.succeeded_count(), report.total_sites);
/// # Ok(())
/// # }
/// ```
pub async fn run_batch(
    config: &Config,
    sites: &[SiteDescriptor],
    writer: &dyn ResultWriter,
) -> Result<(BatchReport, WriteOutcome), SeederError> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let mut coordinator = Coordinator::new(config, fetcher, TokioPacer);
    coordinator.run(sites, writer).await
}
