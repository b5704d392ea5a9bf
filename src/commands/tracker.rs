use anyhow::{bail, Result};
use chrono::DateTime;

use crate::db::{now_timestamp, Database};
use crate::hours::UpdateStrategy;
use crate::models::TrackerEntry;
use crate::tracker::{TrackerService, UpdateOutcome};

/// Start a new working session (tracker entry) against a task.
pub fn start(db: &Database, strategy: UpdateStrategy, taskid: i64) -> Result<()> {
    let service = TrackerService::new(db, strategy);
    let entry = service.create_entry(taskid)?;

    println!(
        "Started tracker #{} for task #{} (hours 0)",
        entry.tracker_id, entry.taskid
    );
    match strategy {
        UpdateStrategy::Elapsed => {
            println!("Run 'mytime tracker update {}' to log elapsed hours.", entry.tracker_id)
        }
        UpdateStrategy::Assigned => println!(
            "Run 'mytime tracker update {} --hours <n>' to log hours.",
            entry.tracker_id
        ),
    }

    Ok(())
}

/// Update an entry's hours under the configured strategy.
pub fn update(
    db: &Database,
    strategy: UpdateStrategy,
    tracker_id: i64,
    hours: Option<i64>,
) -> Result<()> {
    let service = TrackerService::new(db, strategy);
    let outcome = service.update_entry(tracker_id, hours, now_timestamp())?;

    match outcome {
        UpdateOutcome::Recomputed(entry) => {
            println!(
                "Tracker #{} on task #{}: {} hour(s) elapsed since session start",
                entry.tracker_id, entry.taskid, entry.hours
            );
        }
        UpdateOutcome::Assigned {
            tracker_id,
            taskid,
            hours,
        } => {
            println!("Tracker #{} on task #{}: {} hour(s) logged", tracker_id, taskid, hours);
        }
    }

    Ok(())
}

/// List entries, either for one task or across all of them.
pub fn list(db: &Database, strategy: UpdateStrategy, taskid: Option<i64>, json: bool) -> Result<()> {
    let service = TrackerService::new(db, strategy);
    let entries = match taskid {
        Some(id) => service.entries_for_task(id)?,
        None => service.all_entries()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No tracker entries found.");
        return Ok(());
    }

    for entry in &entries {
        print_entry(entry);
    }

    Ok(())
}

pub fn total(db: &Database, strategy: UpdateStrategy, taskid: i64) -> Result<()> {
    let service = TrackerService::new(db, strategy);
    let total = service.total_hours(taskid)?;
    println!("Total hours for task #{}: {}", taskid, total);
    Ok(())
}

fn print_entry(entry: &TrackerEntry) {
    let started = DateTime::from_timestamp(entry.created_at, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    println!(
        "#{:<4} task #{:<4} {:>4}h  started {}",
        entry.tracker_id, entry.taskid, entry.hours, started
    );
}
