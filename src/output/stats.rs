//! Batch summary
//!
//! This module renders the end-of-run summary. The succeeded/total line is
//! always produced, including when nothing succeeded.

use super::traits::{BatchReport, FailureKind};

/// Returns the `succeeded/total` ratio string
pub fn success_ratio(report: &BatchReport) -> String {
    format!("{}/{}", report.succeeded_count(), report.total_sites)
}

/// The headline summary line, shown at the end of every run
pub fn summary_line(report: &BatchReport) -> String {
    format!(
        "Summary: {} sites processed successfully",
        success_ratio(report)
    )
}

/// Renders the summary as text lines, headline first
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![summary_line(report)];

    let summary = report.failure_summary();
    if !summary.is_empty() {
        let mut counts: Vec<(FailureKind, usize)> = summary.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (kind, count) in counts {
            lines.push(format!("  {}: {}", kind, count));
        }
    }

    if let Some(secs) = report.duration_seconds() {
        lines.push(format!("Elapsed: {}s", secs));
    }

    lines
}

/// Logs the batch summary
///
/// The headline goes to debug only. The CLI prints it on stdout, where
/// `--quiet` cannot hide it.
pub fn log_summary(report: &BatchReport) {
    let lines = format_summary(report);
    if let Some((headline, details)) = lines.split_first() {
        tracing::debug!("{}", headline);
        for line in details {
            tracing::info!("{}", line);
        }
    }
}
