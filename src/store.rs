use crate::error::Result;
use crate::state::SchedulerState;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything kept per item between reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSchedule {
    pub state: SchedulerState,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// `None` until the first review; such items are always due.
    pub due: Option<NaiveDate>,
    pub review_count: u32,
    pub success_count: u32,
    pub fail_count: u32,
}

/// Durable per-item storage keyed by a stable item id.
pub trait StateStore {
    fn get(&self, id: &str) -> Result<Option<ItemSchedule>>;
    fn set(&mut self, id: &str, schedule: &ItemSchedule) -> Result<()>;
    /// Returns whether a record was present.
    fn remove(&mut self, id: &str) -> Result<bool>;
    fn ids(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, ItemSchedule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<ItemSchedule>> {
        Ok(self.items.get(id).cloned())
    }

    fn set(&mut self, id: &str, schedule: &ItemSchedule) -> Result<()> {
        self.items.insert(id.to_string(), schedule.clone());
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        Ok(self.items.remove(id).is_some())
    }

    fn ids(&self) -> Result<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::{ItemSchedule, StateStore};
    use crate::error::{Result, SM2Error};
    use crate::state::SchedulerState;
    use chrono::{DateTime, NaiveDate};
    use rusqlite::{Connection, OptionalExtension, Row, params};
    use std::path::Path;

    const DATE_FORMAT: &str = "%Y-%m-%d";

    /// One row per item in a `schedules` table.
    pub struct SqliteStore {
        conn: Connection,
    }

    struct ScheduleRow {
        ease_factor: f64,
        interval_days: u32,
        repetition_count: u32,
        lapse_count: u32,
        last_reviewed_at: Option<i64>,
        due: Option<String>,
        review_count: u32,
        success_count: u32,
        fail_count: u32,
    }

    fn row_to_schedule_row(row: &Row) -> rusqlite::Result<ScheduleRow> {
        Ok(ScheduleRow {
            ease_factor: row.get(0)?,
            interval_days: row.get(1)?,
            repetition_count: row.get(2)?,
            lapse_count: row.get(3)?,
            last_reviewed_at: row.get(4)?,
            due: row.get(5)?,
            review_count: row.get(6)?,
            success_count: row.get(7)?,
            fail_count: row.get(8)?,
        })
    }

    impl ScheduleRow {
        fn into_schedule(self, id: &str) -> Result<ItemSchedule> {
            let corrupt = || SM2Error::CorruptRecord { id: id.to_string() };
            let state = SchedulerState {
                ease_factor: self.ease_factor,
                interval_days: self.interval_days,
                repetition_count: self.repetition_count,
                lapse_count: self.lapse_count,
            };
            if !state.is_valid() {
                return Err(corrupt());
            }
            let last_reviewed_at = self
                .last_reviewed_at
                .map(|ms| DateTime::from_timestamp_millis(ms).ok_or_else(corrupt))
                .transpose()?;
            let due = self
                .due
                .map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|_| corrupt()))
                .transpose()?;
            Ok(ItemSchedule {
                state,
                last_reviewed_at,
                due,
                review_count: self.review_count,
                success_count: self.success_count,
                fail_count: self.fail_count,
            })
        }
    }

    impl SqliteStore {
        pub fn open(path: impl AsRef<Path>) -> Result<Self> {
            Self::with_connection(Connection::open(path)?)
        }

        pub fn open_in_memory() -> Result<Self> {
            Self::with_connection(Connection::open_in_memory()?)
        }

        fn with_connection(conn: Connection) -> Result<Self> {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS schedules (
                    id TEXT PRIMARY KEY,
                    ease_factor REAL NOT NULL,
                    interval_days INTEGER NOT NULL,
                    repetition_count INTEGER NOT NULL,
                    lapse_count INTEGER NOT NULL,
                    last_reviewed_at INTEGER,
                    due TEXT,
                    review_count INTEGER NOT NULL,
                    success_count INTEGER NOT NULL,
                    fail_count INTEGER NOT NULL
                )",
            )?;
            Ok(Self { conn })
        }
    }

    impl StateStore for SqliteStore {
        fn get(&self, id: &str) -> Result<Option<ItemSchedule>> {
            let row = self
                .conn
                .prepare_cached(
                    "SELECT ease_factor, interval_days, repetition_count, lapse_count,
                            last_reviewed_at, due, review_count, success_count, fail_count
                     FROM schedules WHERE id = ?1",
                )?
                .query_row([id], row_to_schedule_row)
                .optional()?;
            row.map(|row| row.into_schedule(id)).transpose()
        }

        fn set(&mut self, id: &str, schedule: &ItemSchedule) -> Result<()> {
            let ItemSchedule {
                state,
                last_reviewed_at,
                due,
                review_count,
                success_count,
                fail_count,
            } = schedule;
            self.conn
                .prepare_cached(
                    "INSERT OR REPLACE INTO schedules
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                )?
                .execute(params![
                    id,
                    state.ease_factor,
                    state.interval_days,
                    state.repetition_count,
                    state.lapse_count,
                    last_reviewed_at.map(|at| at.timestamp_millis()),
                    due.map(|d| d.format(DATE_FORMAT).to_string()),
                    review_count,
                    success_count,
                    fail_count,
                ])?;
            Ok(())
        }

        fn remove(&mut self, id: &str) -> Result<bool> {
            let removed = self
                .conn
                .execute("DELETE FROM schedules WHERE id = ?1", [id])?;
            Ok(removed > 0)
        }

        fn ids(&self) -> Result<Vec<String>> {
            let mut stmt = self.conn.prepare_cached("SELECT id FROM schedules")?;
            let ids = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(ids)
        }
    }

}
