//! Calendar projection of scheduler intervals.
//!
//! Due dates are whole calendar days in the time zone of the instant they are
//! projected from. Pass a `DateTime<Local>` to get the user's local day.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The day of `reference` plus `interval_days`. Negative intervals count as 0.
pub fn project_due_date<Tz: TimeZone>(reference: &DateTime<Tz>, interval_days: i64) -> NaiveDate {
    let day = reference.date_naive();
    day.checked_add_days(Days::new(interval_days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Due date of an item last reviewed at `last_reviewed`. `None` means the item
/// was never reviewed and is due immediately.
pub fn due_date<Tz: TimeZone>(
    last_reviewed: Option<&DateTime<Tz>>,
    interval_days: i64,
) -> Option<NaiveDate> {
    last_reviewed.map(|at| project_due_date(at, interval_days))
}

pub fn is_due(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    due.is_none_or(|due| due <= today)
}

/// Whole days from `today` until `due`, never negative.
pub fn days_until(due: Option<NaiveDate>, today: NaiveDate) -> i64 {
    due.map_or(0, |due| (due - today).num_days().max(0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeLabel {
    Today,
    Tomorrow,
    InDays(i64),
}

impl fmt::Display for RelativeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeLabel::Today => write!(f, "today"),
            RelativeLabel::Tomorrow => write!(f, "tomorrow"),
            RelativeLabel::InDays(days) => write!(f, "{days} days from now"),
        }
    }
}

/// Overdue items fold into [`RelativeLabel::Today`].
pub fn relative_label(days_from_today: i64) -> RelativeLabel {
    match days_from_today {
        ..=0 => RelativeLabel::Today,
        1 => RelativeLabel::Tomorrow,
        days => RelativeLabel::InDays(days),
    }
}

pub fn approximate_label(days: i64) -> String {
    match days {
        ..=0 => RelativeLabel::Today.to_string(),
        1 => "about 1 day from now".to_string(),
        days => format!("about {days} days from now"),
    }
}
