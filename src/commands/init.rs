use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::db::Database;

pub const DATA_DIR: &str = ".mytime";
pub const DB_FILE: &str = "tracker.db";

pub fn run(path: &Path) -> Result<()> {
    let data_dir = path.join(DATA_DIR);

    if data_dir.exists() {
        println!("Already initialized at {}", data_dir.display());
        return Ok(());
    }

    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    let db_path = data_dir.join(DB_FILE);
    Database::open(&db_path)?;

    println!("Initialized mytime in {}", data_dir.display());
    println!("Add a user with 'mytime user add <name>' to get started.");

    Ok(())
}
