use std::fmt;
use std::str::FromStr;

use crate::tracker::TrackerError;

pub const SECONDS_PER_HOUR: i64 = 3600;

/// How `tracker update` derives the hours value for an entry. Chosen once per
/// deployment, not per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Recompute hours from the entry's own timestamps on every update.
    Elapsed,
    /// Persist the caller-supplied hours value verbatim.
    Assigned,
}

impl FromStr for UpdateStrategy {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elapsed" => Ok(UpdateStrategy::Elapsed),
            "assigned" => Ok(UpdateStrategy::Assigned),
            other => Err(TrackerError::InvalidStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for UpdateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStrategy::Elapsed => write!(f, "elapsed"),
            UpdateStrategy::Assigned => write!(f, "assigned"),
        }
    }
}

/// Whole hours elapsed between two epoch-second timestamps, truncated.
/// Clamped to zero when `updated_at` lands before `created_at` (skewed clock
/// or back-dated input); a negative hours-worked figure is never stored.
pub fn compute_elapsed_hours(created_at: i64, updated_at: i64) -> i64 {
    let elapsed = updated_at.saturating_sub(created_at);
    if elapsed < 0 {
        return 0;
    }
    elapsed / SECONDS_PER_HOUR
}

/// Pass a caller-supplied hours value through unchanged. Negative values are
/// rejected; anything else is taken at face value.
pub fn accept_supplied_hours(value: i64) -> Result<i64, TrackerError> {
    if value < 0 {
        return Err(TrackerError::InvalidHours(value));
    }
    Ok(value)
}
