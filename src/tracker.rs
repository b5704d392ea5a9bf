use thiserror::Error;
use tracing::debug;

use crate::db::Database;
use crate::hours::{accept_supplied_hours, UpdateStrategy};
use crate::models::TrackerEntry;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Tracker entry #{0} not found")]
    EntryNotFound(i64),
    #[error("Task #{0} not found")]
    TaskNotFound(i64),
    #[error("Invalid hours value {0}: hours must be non-negative")]
    InvalidHours(i64),
    #[error("Hours are required when the assigned strategy is in effect")]
    MissingHours,
    #[error("Unknown update strategy '{0}'. Must be one of: elapsed, assigned")]
    InvalidStrategy(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// What an update handed back. The recompute path returns the whole entry;
/// the assignment path echoes only the id/task/hours triple.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Recomputed(TrackerEntry),
    Assigned {
        tracker_id: i64,
        taskid: i64,
        hours: i64,
    },
}

impl UpdateOutcome {
    pub fn hours(&self) -> i64 {
        match self {
            UpdateOutcome::Recomputed(entry) => entry.hours,
            UpdateOutcome::Assigned { hours, .. } => *hours,
        }
    }
}

/// Create/update/list/total operations over tracker entries, with the update
/// behavior fixed by the configured strategy.
pub struct TrackerService<'a> {
    db: &'a Database,
    strategy: UpdateStrategy,
}

impl<'a> TrackerService<'a> {
    pub fn new(db: &'a Database, strategy: UpdateStrategy) -> Self {
        TrackerService { db, strategy }
    }

    pub fn strategy(&self) -> UpdateStrategy {
        self.strategy
    }

    /// Start a new working session against a task. The new entry begins at
    /// zero hours with matching creation/update timestamps.
    pub fn create_entry(&self, taskid: i64) -> Result<TrackerEntry, TrackerError> {
        if self.db.get_task(taskid)?.is_none() {
            return Err(TrackerError::TaskNotFound(taskid));
        }
        let entry = self.db.create_entry(taskid)?;
        debug!(tracker_id = entry.tracker_id, taskid, "created tracker entry");
        Ok(entry)
    }

    /// Update an entry's hours as of `now` (epoch seconds). Under `Elapsed`
    /// the hours are re-derived from the entry's timestamps and any supplied
    /// value is ignored; under `Assigned` the supplied value is validated and
    /// persisted verbatim.
    pub fn update_entry(
        &self,
        tracker_id: i64,
        supplied_hours: Option<i64>,
        now: i64,
    ) -> Result<UpdateOutcome, TrackerError> {
        match self.strategy {
            UpdateStrategy::Elapsed => {
                let entry = self
                    .db
                    .recompute_entry_hours(tracker_id, now)?
                    .ok_or(TrackerError::EntryNotFound(tracker_id))?;
                Ok(UpdateOutcome::Recomputed(entry))
            }
            UpdateStrategy::Assigned => {
                let value = supplied_hours.ok_or(TrackerError::MissingHours)?;
                let hours = accept_supplied_hours(value)?;
                let (tracker_id, taskid, hours) = self
                    .db
                    .assign_entry_hours(tracker_id, hours, now)?
                    .ok_or(TrackerError::EntryNotFound(tracker_id))?;
                Ok(UpdateOutcome::Assigned {
                    tracker_id,
                    taskid,
                    hours,
                })
            }
        }
    }

    /// Entries for one task. Empty for an unknown task id, by design.
    pub fn entries_for_task(&self, taskid: i64) -> Result<Vec<TrackerEntry>, TrackerError> {
        Ok(self.db.list_entries_for_task(taskid)?)
    }

    pub fn all_entries(&self) -> Result<Vec<TrackerEntry>, TrackerError> {
        Ok(self.db.list_all_entries()?)
    }

    /// Total hours across every entry for the task; 0 when the task has no
    /// entries or does not exist.
    pub fn total_hours(&self, taskid: i64) -> Result<i64, TrackerError> {
        Ok(self.db.total_hours_for_task(taskid)?)
    }
}
