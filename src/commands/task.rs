use anyhow::{bail, Result};
use std::io::{self, Write};

use crate::db::Database;
use crate::models::{validate_task_status, TASK_STATUSES};

/// Create a task owned by the named user. The owner is resolved by username
/// and must already exist.
pub fn add(db: &Database, username: &str, task_name: &str, description: Option<&str>) -> Result<()> {
    let user = match db.find_user_by_name(username)? {
        Some(u) => u,
        None => bail!("User '{}' not found", username),
    };

    let taskid = db.create_task(user.uid, task_name, description)?;
    println!("Created task #{} for {} (status OPEN)", taskid, username);
    Ok(())
}

pub fn update(
    db: &Database,
    taskid: i64,
    task_name: Option<&str>,
    description: Option<&str>,
    status: Option<&str>,
) -> Result<()> {
    if task_name.is_none() && description.is_none() && status.is_none() {
        bail!("Nothing to update. Use --name, --description, or --status");
    }

    if let Some(s) = status {
        if !validate_task_status(s) {
            bail!(
                "Invalid status '{}'. Allowed values: {}",
                s,
                TASK_STATUSES.join(", ")
            );
        }
    }

    if db.update_task(taskid, task_name, description, status)? {
        println!("Updated task #{}", taskid);
    } else {
        bail!("Task #{} not found", taskid);
    }

    Ok(())
}

pub fn set_status(db: &Database, taskid: i64, status: &str) -> Result<()> {
    if !validate_task_status(status) {
        bail!(
            "Invalid status '{}'. Allowed values: {}",
            status,
            TASK_STATUSES.join(", ")
        );
    }

    if db.set_task_status(taskid, status)? {
        println!("Task #{} is now {}", taskid, status);
    } else {
        bail!("Task #{} not found", taskid);
    }

    Ok(())
}

pub fn list(db: &Database, username: Option<&str>) -> Result<()> {
    let tasks = match username {
        Some(name) => db.list_tasks_for_user(name)?,
        None => db.list_tasks()?,
    };

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    for task in tasks {
        let status_display = format!("[{}]", task.status);
        println!(
            "#{:<4} {:13} {:<40} user #{}",
            task.taskid,
            status_display,
            truncate(&task.task_name, 40),
            task.uid
        );
    }

    Ok(())
}

pub fn delete(db: &Database, taskid: i64, force: bool) -> Result<()> {
    let task = match db.get_task(taskid)? {
        Some(t) => t,
        None => bail!("Task #{} not found", taskid),
    };

    if !force {
        print!(
            "Delete task #{} \"{}\" and its tracker entries? [y/N] ",
            taskid, task.task_name
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if db.delete_task(taskid)? {
        println!("Deleted task #{}", taskid);
    } else {
        bail!("Failed to delete task #{}", taskid);
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}
