//! Output module for batch results
//!
//! This module handles:
//! - The records and report produced by a batch
//! - Writing the seed list file
//! - Rendering the end-of-run summary

mod file_output;
pub mod stats;
mod traits;

pub use file_output::{render_records, FileResultWriter};
pub use stats::{format_summary, log_summary, success_ratio, summary_line};
pub use traits::{
    BatchReport, FailureKind, ResultWriter, SiteFailure, VdpRecord, WriteOutcome,
};
