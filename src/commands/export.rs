use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use tracing::debug;

use crate::db::Database;

/// Render the tasks ⋈ tracker join as CSV: one row per tracker entry with
/// its task id, task name, and hours. Delivery of the report (the original
/// system emailed it on a schedule) is left to whatever consumes the file.
pub fn to_csv(db: &Database) -> Result<String> {
    let rows = db.list_task_hours()?;
    debug!(rows = rows.len(), "exporting task hours");

    let mut csv = String::from("taskid,task_name,hours\n");
    for (taskid, task_name, hours) in rows {
        csv.push_str(&format!("{},{},{}\n", taskid, escape_field(&task_name), hours));
    }

    Ok(csv)
}

pub fn run(db: &Database, output_path: Option<&str>) -> Result<()> {
    let csv = to_csv(db)?;
    let row_count = csv.lines().count().saturating_sub(1);

    match output_path {
        Some(path) => {
            fs::write(path, csv).context("Failed to write export file")?;
            eprintln!("Exported {} row(s) to {}", row_count, path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", csv)?;
        }
    }
    Ok(())
}

// Task names are free text; quote anything that would break a CSV row
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
