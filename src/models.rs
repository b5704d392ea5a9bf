use serde::{Deserialize, Serialize};

/// Task statuses accepted by every update path. The set is closed; there is
/// no transition graph, any value may follow any other.
pub const TASK_STATUSES: [&str; 6] = [
    "OPEN",
    "IN_PROGRESS",
    "PAUSED",
    "STALE",
    "CLOSED",
    "DELETED",
];

pub fn validate_task_status(status: &str) -> bool {
    TASK_STATUSES.contains(&status)
}

/// All timestamps are unix-epoch seconds, matching the stored representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub taskid: i64,
    pub uid: i64,
    pub task_name: String,
    pub task_description: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One recorded working session against a task. `hours` is always derived,
/// either recomputed from the entry's own timestamps or assigned verbatim by
/// the caller; it is never incremented in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerEntry {
    pub tracker_id: i64,
    pub taskid: i64,
    pub hours: i64,
    pub created_at: i64,
    pub updated_at: i64,
}
