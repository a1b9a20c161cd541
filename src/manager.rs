use crate::due::{RelativeLabel, days_until, is_due, project_due_date, relative_label};
use crate::error::Result;
use crate::outcome::ReviewOutcome;
use crate::preview::NextStates;
use crate::scheduler::SM2;
use crate::state::SchedulerState;
use crate::store::{ItemSchedule, StateStore};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use itertools::Itertools;
use log::debug;

/// Result of recording one review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub id: String,
    pub outcome: ReviewOutcome,
    pub previous: SchedulerState,
    pub state: SchedulerState,
    pub due: NaiveDate,
}

/// Reads, schedules and writes back review state for items in a [`StateStore`].
///
/// Each review is a single load/compute/store on `&mut self`; callers sharing a
/// manager across threads need their own lock around it.
pub struct ReviewManager<S> {
    store: S,
    scheduler: SM2,
}

impl<S: StateStore> ReviewManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_scheduler(store, SM2::default())
    }

    pub fn with_scheduler(store: S, scheduler: SM2) -> Self {
        Self { store, scheduler }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn scheduler(&self) -> &SM2 {
        &self.scheduler
    }

    /// Starts tracking `id` with a fresh state. Returns `false` if it was
    /// already tracked, leaving the existing record alone.
    pub fn introduce(&mut self, id: &str) -> Result<bool> {
        if self.store.get(id)?.is_some() {
            return Ok(false);
        }
        self.store.set(id, &ItemSchedule::default())?;
        Ok(true)
    }

    pub fn schedule(&self, id: &str) -> Result<ItemSchedule> {
        Ok(self.store.get(id)?.unwrap_or_default())
    }

    pub fn review<Tz: TimeZone>(
        &mut self,
        id: &str,
        outcome: ReviewOutcome,
        now: &DateTime<Tz>,
    ) -> Result<ReviewRecord> {
        let mut schedule = self.schedule(id)?;
        let previous = schedule.state;
        let state = self.scheduler.review_outcome(&previous, outcome);
        let due = project_due_date(now, state.interval_days as i64);

        schedule.state = state;
        schedule.last_reviewed_at = Some(now.with_timezone(&Utc));
        schedule.due = Some(due);
        schedule.review_count = schedule.review_count.saturating_add(1);
        match outcome {
            ReviewOutcome::Success => {
                schedule.success_count = schedule.success_count.saturating_add(1)
            }
            ReviewOutcome::Fail => schedule.fail_count = schedule.fail_count.saturating_add(1),
            ReviewOutcome::Medium => {}
        }
        self.store.set(id, &schedule)?;

        debug!(
            "reviewed {id} as {outcome}: interval {} -> {} days, ease {:.2}, due {due}",
            previous.interval_days, state.interval_days, state.ease_factor
        );
        Ok(ReviewRecord {
            id: id.to_string(),
            outcome,
            previous,
            state,
            due,
        })
    }

    pub fn preview(&self, id: &str) -> Result<NextStates> {
        Ok(self.scheduler.next_states(&self.schedule(id)?.state))
    }

    /// Ids due on or before `today`, never-reviewed items first, then by due
    /// date and id.
    pub fn due_items(&self, today: NaiveDate) -> Result<Vec<String>> {
        let schedules = self
            .store
            .ids()?
            .into_iter()
            .map(|id| Ok((self.schedule(&id)?.due, id)))
            .collect::<Result<Vec<_>>>()?;
        Ok(schedules
            .into_iter()
            .filter(|(due, _)| is_due(*due, today))
            .sorted()
            .map(|(_, id)| id)
            .collect())
    }

    pub fn due_label(&self, id: &str, today: NaiveDate) -> Result<RelativeLabel> {
        let due = self.schedule(id)?.due;
        Ok(relative_label(days_until(due, today)))
    }

    /// Drops the record for `id`, e.g. when its card is deleted.
    pub fn forget(&mut self, id: &str) -> Result<bool> {
        self.store.remove(id)
    }
}
