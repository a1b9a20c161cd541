use crate::error::{Result, SM2Error};
use crate::outcome::ReviewOutcome;
use crate::preview::{NextStates, ProjectedOutcome};
use crate::state::{
    FAILURE_THRESHOLD, FIRST_INTERVAL, MAX_QUALITY, MIN_EASE_FACTOR, SECOND_INTERVAL,
    SchedulerState,
};
use log::trace;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Recall quality on the 0-5 SM-2 scale. Always within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Quality(u8);

impl Quality {
    /// Clamps any integer into `0..=5`.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, MAX_QUALITY as i32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_failure(self) -> bool {
        self.0 < FAILURE_THRESHOLD
    }
}

impl From<i32> for Quality {
    fn from(value: i32) -> Self {
        Quality::clamped(value)
    }
}

impl From<Quality> for i32 {
    fn from(q: Quality) -> i32 {
        q.0 as i32
    }
}

/// SM-2 ease factor update, floored at 1.3.
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = MAX_QUALITY.saturating_sub(quality.value()) as f64;
    let delta = 0.1 - miss * (0.08 + miss * 0.02);
    (ease_factor + delta).max(MIN_EASE_FACTOR)
}

/// Applies one review to `state` and returns the resulting state.
///
/// The ease factor is updated first and the updated value feeds the interval
/// multiplication for the third and later consecutive successes.
pub fn review(state: &SchedulerState, quality: i32) -> SchedulerState {
    let quality = Quality::clamped(quality);
    let mut next = *state;
    next.ease_factor = next_ease_factor(state.ease_factor, quality);

    if quality.is_failure() {
        next.repetition_count = 0;
        next.interval_days = FIRST_INTERVAL;
        next.lapse_count = state.lapse_count.saturating_add(1);
        trace!("lapse: q={} -> {:?}", quality.value(), next);
        return next;
    }

    next.repetition_count = state.repetition_count.saturating_add(1);
    next.interval_days = match next.repetition_count {
        1 => FIRST_INTERVAL,
        2 => SECOND_INTERVAL,
        _ => ((state.interval_days as f64 * next.ease_factor).round() as u32).max(1),
    };
    trace!("success: q={} -> {:?}", quality.value(), next);
    next
}

/// The classic "double on success" rule, kept as an alternative to SM-2.
/// Ease factors still follow the SM-2 update so every mode keeps the same
/// state invariants.
fn review_doubling(state: &SchedulerState, quality: i32, max_interval: u32) -> SchedulerState {
    let quality = Quality::clamped(quality);
    let mut next = *state;
    next.ease_factor = next_ease_factor(state.ease_factor, quality);

    if quality.is_failure() {
        next.repetition_count = 0;
        next.interval_days = FIRST_INTERVAL;
        next.lapse_count = state.lapse_count.saturating_add(1);
        return next;
    }

    next.repetition_count = state.repetition_count.saturating_add(1);
    next.interval_days = if quality.value() == FAILURE_THRESHOLD {
        state.interval_days.max(2)
    } else {
        state.interval_days.saturating_mul(2).min(max_interval)
    }
    .max(FIRST_INTERVAL);
    next
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum SchedulingMode {
    #[default]
    Sm2,
    SimpleDoubling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub mode: SchedulingMode,
    /// Upper bound for [`SchedulingMode::SimpleDoubling`] intervals.
    pub max_interval: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mode: SchedulingMode::Sm2,
            max_interval: 30,
        }
    }
}

/// A configured scheduler.
#[derive(Debug, Clone, Default)]
pub struct SM2 {
    config: SchedulerConfig,
}

impl SM2 {
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        if config.max_interval == 0 {
            return Err(SM2Error::InvalidParameters);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn review(&self, state: &SchedulerState, quality: i32) -> SchedulerState {
        match self.config.mode {
            SchedulingMode::Sm2 => review(state, quality),
            SchedulingMode::SimpleDoubling => {
                review_doubling(state, quality, self.config.max_interval)
            }
        }
    }

    pub fn review_outcome(&self, state: &SchedulerState, outcome: ReviewOutcome) -> SchedulerState {
        self.review(state, outcome.quality().into())
    }

    /// What-if states for each answer button. `state` is left untouched.
    pub fn next_states(&self, state: &SchedulerState) -> NextStates {
        let project =
            |outcome| ProjectedOutcome::new(state, outcome, self.review_outcome(state, outcome));
        NextStates {
            fail: project(ReviewOutcome::Fail),
            medium: project(ReviewOutcome::Medium),
            success: project(ReviewOutcome::Success),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TestHelper;

    fn state(ease_factor: f64, interval_days: u32, repetition_count: u32) -> SchedulerState {
        SchedulerState {
            ease_factor,
            interval_days,
            repetition_count,
            lapse_count: 0,
        }
    }

    #[test]
    fn first_success() {
        let next = review(&SchedulerState::default(), 5);
        assert_eq!(next.repetition_count, 1);
        assert_eq!(next.interval_days, 1);
        next.ease_factor.assert_approx_eq(2.6);
    }

    #[test]
    fn second_success() {
        let next = review(&state(2.6, 1, 1), 5);
        assert_eq!(next.repetition_count, 2);
        assert_eq!(next.interval_days, 6);
        next.ease_factor.assert_approx_eq(2.7);
    }

    #[test]
    fn third_success_uses_updated_ease_factor() {
        let next = review(&state(2.5, 6, 2), 5);
        assert_eq!(next.repetition_count, 3);
        // 6 * 2.6, not 6 * 2.5
        assert_eq!(next.interval_days, 16);
        next.ease_factor.assert_approx_eq(2.6);
    }

    #[test]
    fn failure_resets() {
        let input = SchedulerState {
            ease_factor: 2.5,
            interval_days: 6,
            repetition_count: 3,
            lapse_count: 2,
        };
        for q in 0..3 {
            let next = review(&input, q);
            assert_eq!(next.repetition_count, 0);
            assert_eq!(next.interval_days, 1);
            assert_eq!(next.lapse_count, 3);
            assert!(next.ease_factor < input.ease_factor);
        }
    }

    #[test]
    fn quality_three_is_success() {
        let next = review(&state(2.5, 6, 2), 3);
        assert_eq!(next.repetition_count, 3);
        assert_eq!(next.lapse_count, 0);
        next.ease_factor.assert_approx_eq(2.36);
        // round(6 * 2.36) = round(14.16)
        assert_eq!(next.interval_days, 14);
    }

    #[test]
    fn ease_factor_deltas() {
        let deltas = (0..=5)
            .map(|q| next_ease_factor(2.5, Quality::clamped(q)) - 2.5)
            .collect::<Vec<_>>();
        deltas.assert_approx_eq([-0.8, -0.54, -0.32, -0.14, 0.0, 0.1]);
    }

    #[test]
    fn ease_factor_floor() {
        let mut s = state(1.35, 10, 5);
        for _ in 0..10 {
            s = review(&s, 3);
            assert!(s.ease_factor >= MIN_EASE_FACTOR);
        }
        for q in 0..=5 {
            for ef in [1.3, 1.31, 1.5, 2.5, 4.0] {
                assert!(review(&state(ef, 3, 4), q).ease_factor >= MIN_EASE_FACTOR);
            }
        }
        assert_eq!(review(&state(1.3, 1, 1), 0).ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn lapse_count_is_monotonic() {
        let input = SchedulerState {
            ease_factor: 2.0,
            interval_days: 9,
            repetition_count: 4,
            lapse_count: 5,
        };
        for q in 0..=5 {
            let next = review(&input, q);
            if q >= 3 {
                assert_eq!(next.lapse_count, input.lapse_count);
            } else {
                assert_eq!(next.lapse_count, input.lapse_count + 1);
            }
        }
    }

    #[test]
    fn quality_is_clamped() {
        let input = state(2.2, 6, 2);
        assert_eq!(review(&input, -5), review(&input, 0));
        assert_eq!(review(&input, i32::MIN), review(&input, 0));
        assert_eq!(review(&input, 99), review(&input, 5));
        assert_eq!(Quality::clamped(7).value(), 5);
        assert_eq!(Quality::clamped(-1).value(), 0);
    }

    #[test]
    fn interval_never_below_one() {
        let next = review(&state(1.3, 0, 2), 5);
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn review_is_pure() {
        let input = state(2.5, 6, 2);
        let copy = input;
        let _ = review(&input, 5);
        assert_eq!(input, copy);
    }

    #[test]
    fn success_then_failure_sequence() {
        let qualities = [5, 5, 5, 2];
        let states = qualities
            .iter()
            .scan(SchedulerState::default(), |s, &q| {
                *s = review(s, q);
                Some(*s)
            })
            .collect::<Vec<_>>();
        let intervals = states.iter().map(|s| s.interval_days).collect::<Vec<_>>();
        // the third success multiplies the previous 6 days by the fresh 2.8
        assert_eq!(intervals, [1, 6, 17, 1]);
        states
            .iter()
            .map(|s| s.ease_factor)
            .collect::<Vec<_>>()
            .assert_approx_eq([2.6, 2.7, 2.8, 2.48]);
        let last = states.last().unwrap();
        assert_eq!(last.lapse_count, 1);
        assert_eq!(last.repetition_count, 0);
        assert!(last.ease_factor <= states[2].ease_factor);
    }

    #[test]
    fn simple_doubling() {
        let scheduler = SM2::new(SchedulerConfig {
            mode: SchedulingMode::SimpleDoubling,
            ..Default::default()
        })
        .unwrap();
        let new = SchedulerState::default();
        assert_eq!(scheduler.review(&new, 5).interval_days, 1);
        assert_eq!(scheduler.review(&new, 3).interval_days, 2);
        assert_eq!(scheduler.review(&state(2.5, 4, 2), 5).interval_days, 8);
        assert_eq!(scheduler.review(&state(2.5, 20, 2), 4).interval_days, 30);
        assert_eq!(scheduler.review(&state(2.5, 7, 2), 3).interval_days, 7);
        let failed = scheduler.review(&state(2.5, 20, 2), 1);
        assert_eq!(failed.interval_days, 1);
        assert_eq!(failed.repetition_count, 0);
        assert_eq!(failed.lapse_count, 1);
    }

    #[test]
    fn default_scheduler_is_sm2() {
        let scheduler = SM2::default();
        assert_eq!(scheduler.config().mode, SchedulingMode::Sm2);
        let input = state(2.5, 6, 2);
        assert_eq!(scheduler.review(&input, 4), review(&input, 4));
    }

    #[test]
    fn invalid_config() {
        let result = SM2::new(SchedulerConfig {
            mode: SchedulingMode::SimpleDoubling,
            max_interval: 0,
        });
        assert!(matches!(result, Err(SM2Error::InvalidParameters)));
    }

    #[test]
    fn quality_deserializes_through_clamp() {
        use serde::de::IntoDeserializer;
        use serde::de::value::Error;

        let from = |v: i32| Quality::deserialize(IntoDeserializer::<Error>::into_deserializer(v));
        assert_eq!(from(9).unwrap().value(), 5);
        assert_eq!(from(-3).unwrap().value(), 0);
        assert_eq!(from(4).unwrap().value(), 4);
        next_ease_factor(2.5, from(9).unwrap()).assert_approx_eq(2.6);
        assert_eq!(i32::from(Quality::from(12)), 5);
    }

    #[test]
    fn counters_saturate() {
        let worn = SchedulerState {
            ease_factor: 2.5,
            interval_days: 6,
            repetition_count: u32::MAX,
            lapse_count: u32::MAX,
        };
        let failed = review(&worn, 0);
        assert_eq!(failed.lapse_count, u32::MAX);
        assert_eq!(failed.repetition_count, 0);
        let passed = review(&worn, 5);
        assert_eq!(passed.repetition_count, u32::MAX);
        assert_eq!(passed.lapse_count, u32::MAX);

        let doubling = SM2::new(SchedulerConfig {
            mode: SchedulingMode::SimpleDoubling,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(doubling.review(&worn, 1).lapse_count, u32::MAX);
        assert_eq!(doubling.review(&worn, 5).repetition_count, u32::MAX);
    }

    #[test]
    fn mode_names() {
        assert_eq!(SchedulingMode::SimpleDoubling.to_string(), "simple_doubling");
        assert_eq!("sm2".parse::<SchedulingMode>().unwrap(), SchedulingMode::Sm2);
    }
}
