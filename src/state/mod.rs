//! State module for tracking batch progress
//!
//! Every site in a batch runs through a small state machine so the
//! orchestrator's pacing is explicit and testable.

mod site_state;

pub use site_state::{SiteProgress, SiteState};
