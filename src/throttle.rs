//! Request pacing between show pages.
//!
//! The archive gets a random 3–5 second gap between pages and a longer fixed
//! break at every milestone id.

use crate::config::HarvestConfig;
use rand::Rng;
use std::time::Duration;

/// Why a pause has the length it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseKind {
    Regular,
    Milestone,
}

/// How long to wait after processing `show_id`.
pub fn pause_after(show_id: u32, config: &HarvestConfig) -> (Duration, PauseKind) {
    if config.milestone_every > 0 && show_id % config.milestone_every == 0 {
        return (config.milestone_pause, PauseKind::Milestone);
    }
    (
        random_between(config.min_delay, config.max_delay),
        PauseKind::Regular,
    )
}

fn random_between(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let millis = rand::rng().random_range(min.as_millis() as u64..=max.as_millis() as u64);
    Duration::from_millis(millis)
}
