//! Request pacing
//!
//! This module handles:
//! - The politeness delay between sites
//! - The randomized pause after the homepage warm-up
//!
//! All waiting goes through the `Pacer` trait so a batch can be driven in tests
//! without real sleeps.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Suspends the batch for a given duration
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Pacer backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Picks a random warm-up pause within `[min_ms, max_ms]`
///
/// Returns zero when both bounds are zero. An inverted range collapses to
/// `min_ms`.
pub fn warmup_duration(min_ms: u64, max_ms: u64) -> Duration {
    if max_ms <= min_ms {
        return Duration::from_millis(min_ms);
    }
    let ms = rand::thread_rng().gen_range(min_ms..=max_ms);
    Duration::from_millis(ms)
}
