//! Site state definitions for tracking batch progress
//!
//! Each site moves through `Pending -> Probing -> Delaying -> Done`. The
//! delay state is entered after both successful and failed probes.

use std::fmt;

/// Represents the current state of a site in the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteState {
    /// Site parsed but not yet visited
    Pending,

    /// Homepage, robots.txt and sitemap candidates are being fetched
    Probing,

    /// Waiting out the politeness delay before the next site
    Delaying,

    /// Site finished, whatever the outcome
    Done,
}

impl SiteState {
    /// Returns true if no further processing happens for this site
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: SiteState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Probing)
                | (Self::Probing, Self::Delaying)
                | (Self::Probing, Self::Done)
                | (Self::Delaying, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Probing => "probing",
            Self::Delaying => "delaying",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks one site's progress through the state machine
#[derive(Debug, Clone)]
pub struct SiteProgress {
    state: SiteState,
}

impl SiteProgress {
    pub fn new() -> Self {
        Self {
            state: SiteState::Pending,
        }
    }

    pub fn state(&self) -> SiteState {
        self.state
    }

    /// Moves to `next`, rejecting transitions the state machine does not allow
    pub fn advance(&mut self, next: SiteState) -> Result<(), crate::SeederError> {
        if !self.state.can_transition_to(next) {
            return Err(crate::SeederError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("Site state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

impl Default for SiteProgress {
    fn default() -> Self {
        Self::new()
    }
}
