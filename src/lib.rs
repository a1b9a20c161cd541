mod due;
mod error;
mod manager;
mod outcome;
mod preview;
mod scheduler;
mod state;
mod store;
#[cfg(test)]
mod test_helpers;

pub use due::{
    RelativeLabel, approximate_label, days_until, due_date, is_due, project_due_date,
    relative_label,
};
pub use error::{Result, SM2Error};
pub use manager::{ReviewManager, ReviewRecord};
pub use outcome::{ReviewOutcome, map_outcome};
pub use preview::{NextStates, ProjectedOutcome, preview_all};
pub use scheduler::{Quality, SM2, SchedulerConfig, SchedulingMode, next_ease_factor, review};
pub use state::{
    FAILURE_THRESHOLD, FIRST_INTERVAL, INITIAL_EASE_FACTOR, MAX_QUALITY, MIN_EASE_FACTOR,
    SECOND_INTERVAL, SchedulerState,
};
#[cfg(feature = "sqlite")]
pub use store::SqliteStore;
pub use store::{ItemSchedule, MemoryStore, StateStore};
