use anyhow::{bail, Result};
use chrono::DateTime;

use crate::db::Database;

pub fn add(db: &Database, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("User name cannot be empty");
    }

    if db.find_user_by_name(name)?.is_some() {
        bail!("User '{}' already exists", name);
    }

    let user = db.create_user(name)?;
    println!("Created user #{}: {}", user.uid, user.name);
    Ok(())
}

pub fn rename(db: &Database, uid: i64, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("User name cannot be empty");
    }

    if db.rename_user(uid, name)? {
        println!("Renamed user #{} to {}", uid, name);
    } else {
        bail!("User #{} not found", uid);
    }

    Ok(())
}

pub fn list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    for user in users {
        let since = DateTime::from_timestamp(user.created_at, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("#{:<4} {:<24} {:8} since {}", user.uid, user.name, user.status, since);
    }

    Ok(())
}
