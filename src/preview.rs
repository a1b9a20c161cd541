use crate::due::{RelativeLabel, approximate_label, relative_label};
use crate::outcome::ReviewOutcome;
use crate::scheduler::SM2;
use crate::state::SchedulerState;
use serde::{Deserialize, Serialize};

/// What would happen if the reviewer pressed one particular button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedOutcome {
    pub outcome: ReviewOutcome,
    pub interval_days: u32,
    pub label: RelativeLabel,
    /// Tooltip text. The ease factor, repetitions and interval it reports are
    /// those of the state being previewed, not of the projection.
    pub explanation: String,
    pub state: SchedulerState,
}

impl ProjectedOutcome {
    pub(crate) fn new(
        current: &SchedulerState,
        outcome: ReviewOutcome,
        next: SchedulerState,
    ) -> Self {
        let days = next.interval_days as i64;
        let explanation = format!(
            "SM-2 · current EF: {:.2} · repetitions: {} · current interval: {} days\n\
             {outcome} → next interval {} days · {}",
            current.ease_factor,
            current.repetition_count,
            current.interval_days,
            next.interval_days,
            approximate_label(days),
        );
        Self {
            outcome,
            interval_days: next.interval_days,
            label: relative_label(days),
            explanation,
            state: next,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStates {
    pub fail: ProjectedOutcome,
    pub medium: ProjectedOutcome,
    pub success: ProjectedOutcome,
}

impl NextStates {
    pub fn get(&self, outcome: ReviewOutcome) -> &ProjectedOutcome {
        match outcome {
            ReviewOutcome::Fail => &self.fail,
            ReviewOutcome::Medium => &self.medium,
            ReviewOutcome::Success => &self.success,
        }
    }

    pub fn intervals(&self) -> [u32; 3] {
        [
            self.fail.interval_days,
            self.medium.interval_days,
            self.success.interval_days,
        ]
    }
}

/// SM-2 previews for all three buttons, each computed from the same `state`.
pub fn preview_all(state: &SchedulerState) -> NextStates {
    SM2::default().next_states(state)
}
