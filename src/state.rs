use serde::{Deserialize, Serialize};

pub const INITIAL_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Qualities below this value are failed reviews.
pub const FAILURE_THRESHOLD: u8 = 3;
pub const MAX_QUALITY: u8 = 5;
pub const FIRST_INTERVAL: u32 = 1;
pub const SECOND_INTERVAL: u32 = 6;

/// Spaced-repetition progress of a single item.
///
/// A fresh item has `interval_days == 0`; any applied review leaves it at
/// one day or more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerState {
    pub ease_factor: f64,
    pub interval_days: u32,
    /// Consecutive successful reviews, reset on failure.
    pub repetition_count: u32,
    /// Total failed reviews, never reset.
    pub lapse_count: u32,
}

impl SchedulerState {
    pub const fn new() -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 0,
            repetition_count: 0,
            lapse_count: 0,
        }
    }

    /// Whether the item has never been through a review.
    pub fn is_new(&self) -> bool {
        self.interval_days == 0 && self.repetition_count == 0 && self.lapse_count == 0
    }

    /// Checks the invariants a state coming out of storage must satisfy.
    pub fn is_valid(&self) -> bool {
        self.ease_factor.is_finite() && self.ease_factor >= MIN_EASE_FACTOR
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new()
    }
}
