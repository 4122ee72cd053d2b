//! Output handler traits and types
//!
//! This module defines the result records produced by a batch, the batch
//! report, and the trait interface for persisting records.

use crate::SeederError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// One seed line: a vehicle detail page and the site's label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdpRecord {
    vdp_url: String,
    label: String,
}

impl VdpRecord {
    /// Creates a record, refusing an empty URL
    pub fn new(vdp_url: impl Into<String>, label: impl Into<String>) -> Option<Self> {
        let vdp_url = vdp_url.into();
        if vdp_url.trim().is_empty() {
            return None;
        }
        Some(Self {
            vdp_url,
            label: label.into(),
        })
    }

    pub fn vdp_url(&self) -> &str {
        &self.vdp_url
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Formats the record as an output line: `<vdp_url>|<label>`
    pub fn to_line(&self) -> String {
        format!("{}|{}", self.vdp_url, self.label)
    }
}

/// Why a site produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    /// Homepage looked like a block page
    SiteBlocked,
    /// Homepage could not be fetched
    FetchFailed,
    /// No candidate sitemap validated
    NotFound,
    /// Sitemap found but it lists no pages
    EmptyFeed,
    /// Anything else (bad URL, state machine violation)
    Other,
}

impl FailureKind {
    pub fn from_error(error: &SeederError) -> Self {
        match error {
            SeederError::SiteBlocked { .. } => Self::SiteBlocked,
            SeederError::Fetch(_) => Self::FetchFailed,
            SeederError::NotFound { .. } => Self::NotFound,
            SeederError::EmptyFeed { .. } => Self::EmptyFeed,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SiteBlocked => "site blocked",
            Self::FetchFailed => "fetch failed",
            Self::NotFound => "no sitemap found",
            Self::EmptyFeed => "empty sitemap",
            Self::Other => "other error",
        };
        f.write_str(s)
    }
}

/// A site that produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFailure {
    pub base_url: String,
    pub kind: FailureKind,
}

/// Aggregated result of a batch
///
/// `records` holds successful sites in input order with no placeholders for
/// failed ones.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub total_sites: usize,
    pub records: Vec<VdpRecord>,
    pub failures: Vec<SiteFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchReport {
    pub fn new(total_sites: usize) -> Self {
        Self {
            total_sites,
            records: Vec::new(),
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn succeeded_count(&self) -> usize {
        self.records.len()
    }

    pub fn record_success(&mut self, record: VdpRecord) {
        self.records.push(record);
    }

    pub fn record_failure(&mut self, base_url: &str, kind: FailureKind) {
        self.failures.push(SiteFailure {
            base_url: base_url.to_string(),
            kind,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Failure counts by kind
    pub fn failure_summary(&self) -> HashMap<FailureKind, usize> {
        let mut summary = HashMap::new();
        for failure in &self.failures {
            *summary.entry(failure.kind).or_insert(0) += 1;
        }
        summary
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// What happened when the report was handed to the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Records were written
    Written { count: usize },
    /// No site succeeded, so nothing was written
    NothingToWrite,
}

/// Trait for persisting batch results
pub trait ResultWriter: Send + Sync {
    /// Writes all records in one operation
    fn write_records(&self, records: &[VdpRecord]) -> Result<(), SeederError>;
}
