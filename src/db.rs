use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

use crate::hours::compute_elapsed_hours;
use crate::models::{Task, TrackerEntry, User};

const SCHEMA_VERSION: i32 = 1;

/// Single handle to the backing store. Opened once at startup and passed by
/// reference to every operation; dropped at exit.
pub struct Database {
    conn: Connection,
}

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open database")?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM pragma_user_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if version < SCHEMA_VERSION {
            debug!(version, "initializing schema");
            self.conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    uid INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL,
                    status TEXT NOT NULL DEFAULT 'ACTIVE'
                );

                CREATE TABLE IF NOT EXISTS tasks (
                    taskid INTEGER PRIMARY KEY AUTOINCREMENT,
                    uid INTEGER NOT NULL,
                    task_name TEXT NOT NULL,
                    task_description TEXT,
                    status TEXT NOT NULL DEFAULT 'OPEN',
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL,
                    FOREIGN KEY (uid) REFERENCES users(uid)
                );

                -- One row per logged working session
                CREATE TABLE IF NOT EXISTS task_tracker (
                    tracker_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    taskid INTEGER NOT NULL,
                    hours INTEGER NOT NULL DEFAULT 0,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL,
                    FOREIGN KEY (taskid) REFERENCES tasks(taskid) ON DELETE CASCADE
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_uid ON tasks(uid);
                CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
                CREATE INDEX IF NOT EXISTS idx_tracker_taskid ON task_tracker(taskid);
                "#,
            )?;

            self.conn
                .execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
        }

        // Enable foreign keys
        self.conn.execute("PRAGMA foreign_keys = ON", [])?;

        Ok(())
    }

    // User CRUD
    pub fn create_user(&self, name: &str) -> Result<User> {
        let now = now_timestamp();
        self.conn.execute(
            "INSERT INTO users (name, created_at, updated_at, status) VALUES (?1, ?2, ?2, 'ACTIVE')",
            params![name, now],
        )?;
        Ok(User {
            uid: self.conn.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            status: "ACTIVE".to_string(),
        })
    }

    pub fn rename_user(&self, uid: i64, name: &str) -> Result<bool> {
        let now = now_timestamp();
        let rows = self.conn.execute(
            "UPDATE users SET name = ?1, updated_at = ?2 WHERE uid = ?3",
            params![name, now, uid],
        )?;
        Ok(rows > 0)
    }

    pub fn get_user(&self, uid: i64) -> Result<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT uid, name, created_at, updated_at, status FROM users WHERE uid = ?1",
        )?;

        let user = stmt
            .query_row([uid], |row| {
                Ok(User {
                    uid: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                    status: row.get(4)?,
                })
            })
            .optional()?;

        Ok(user)
    }

    pub fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT uid, name, created_at, updated_at, status FROM users WHERE name = ?1",
        )?;

        let user = stmt
            .query_row([name], |row| {
                Ok(User {
                    uid: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                    status: row.get(4)?,
                })
            })
            .optional()?;

        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT uid, name, created_at, updated_at, status FROM users ORDER BY uid",
        )?;

        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    uid: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                    status: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    // Task CRUD
    pub fn create_task(&self, uid: i64, task_name: &str, task_description: Option<&str>) -> Result<i64> {
        let now = now_timestamp();
        self.conn.execute(
            "INSERT INTO tasks (uid, task_name, task_description, status, created_at, updated_at) VALUES (?1, ?2, ?3, 'OPEN', ?4, ?4)",
            params![uid, task_name, task_description, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_task(&self, taskid: i64) -> Result<Option<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT taskid, uid, task_name, task_description, status, created_at, updated_at FROM tasks WHERE taskid = ?1",
        )?;

        let task = stmt
            .query_row([taskid], |row| {
                Ok(Task {
                    taskid: row.get(0)?,
                    uid: row.get(1)?,
                    task_name: row.get(2)?,
                    task_description: row.get(3)?,
                    status: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })
            .optional()?;

        Ok(task)
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT taskid, uid, task_name, task_description, status, created_at, updated_at FROM tasks ORDER BY taskid ASC",
        )?;

        let tasks = stmt
            .query_map([], |row| {
                Ok(Task {
                    taskid: row.get(0)?,
                    uid: row.get(1)?,
                    task_name: row.get(2)?,
                    task_description: row.get(3)?,
                    status: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    pub fn list_tasks_for_user(&self, username: &str) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT t.taskid, t.uid, t.task_name, t.task_description, t.status, t.created_at, t.updated_at
            FROM tasks t
            INNER JOIN users u ON t.uid = u.uid
            WHERE u.name = ?1
            ORDER BY t.taskid ASC
            "#,
        )?;

        let tasks = stmt
            .query_map([username], |row| {
                Ok(Task {
                    taskid: row.get(0)?,
                    uid: row.get(1)?,
                    task_name: row.get(2)?,
                    task_description: row.get(3)?,
                    status: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    pub fn update_task(
        &self,
        taskid: i64,
        task_name: Option<&str>,
        task_description: Option<&str>,
        status: Option<&str>,
    ) -> Result<bool> {
        let now = now_timestamp();
        let mut updates = vec!["updated_at = ?1".to_string()];
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(now)];

        if let Some(n) = task_name {
            updates.push(format!("task_name = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(n.to_string()));
        }

        if let Some(d) = task_description {
            updates.push(format!("task_description = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(d.to_string()));
        }

        if let Some(s) = status {
            updates.push(format!("status = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(s.to_string()));
        }

        params_vec.push(Box::new(taskid));
        let sql = format!(
            "UPDATE tasks SET {} WHERE taskid = ?{}",
            updates.join(", "),
            params_vec.len()
        );

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let rows = self.conn.execute(&sql, params_refs.as_slice())?;
        Ok(rows > 0)
    }

    pub fn set_task_status(&self, taskid: i64, status: &str) -> Result<bool> {
        let now = now_timestamp();
        let rows = self.conn.execute(
            "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE taskid = ?3",
            params![status, now, taskid],
        )?;
        Ok(rows > 0)
    }

    /// Tracker entries referencing the task go with it (cascade).
    pub fn delete_task(&self, taskid: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM tasks WHERE taskid = ?1", [taskid])?;
        Ok(rows > 0)
    }

    // Tracker entry store
    pub fn create_entry(&self, taskid: i64) -> Result<TrackerEntry> {
        let now = now_timestamp();
        self.conn.execute(
            "INSERT INTO task_tracker (taskid, hours, created_at, updated_at) VALUES (?1, 0, ?2, ?2)",
            params![taskid, now],
        )?;
        Ok(TrackerEntry {
            tracker_id: self.conn.last_insert_rowid(),
            taskid,
            hours: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_entry(&self, tracker_id: i64) -> Result<Option<TrackerEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT tracker_id, taskid, hours, created_at, updated_at FROM task_tracker WHERE tracker_id = ?1",
        )?;

        let entry = stmt
            .query_row([tracker_id], |row| {
                Ok(TrackerEntry {
                    tracker_id: row.get(0)?,
                    taskid: row.get(1)?,
                    hours: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })
            .optional()?;

        Ok(entry)
    }

    /// Recompute an entry's hours from its own timestamps: stamp
    /// `updated_at = now`, read the entry back, derive hours from the freshly
    /// read `created_at`, write hours. The whole sequence runs inside one
    /// transaction so two concurrent recomputes of the same entry cannot
    /// interleave and store hours derived from the other request's timestamp.
    pub fn recompute_entry_hours(&self, tracker_id: i64, now: i64) -> Result<Option<TrackerEntry>> {
        let tx = self.conn.unchecked_transaction()?;

        let rows = tx.execute(
            "UPDATE task_tracker SET updated_at = ?1 WHERE tracker_id = ?2",
            params![now, tracker_id],
        )?;
        if rows == 0 {
            return Ok(None);
        }

        let created_at: i64 = tx.query_row(
            "SELECT created_at FROM task_tracker WHERE tracker_id = ?1",
            [tracker_id],
            |row| row.get(0),
        )?;
        let hours = compute_elapsed_hours(created_at, now);

        tx.execute(
            "UPDATE task_tracker SET hours = ?1 WHERE tracker_id = ?2",
            params![hours, tracker_id],
        )?;
        tx.commit()?;

        debug!(tracker_id, hours, "recomputed entry hours");
        self.get_entry(tracker_id)
    }

    /// Persist a caller-supplied hours value verbatim. Returns only the
    /// (tracker_id, taskid, hours) triple; the rest of the row is not read
    /// back on this path.
    pub fn assign_entry_hours(
        &self,
        tracker_id: i64,
        hours: i64,
        now: i64,
    ) -> Result<Option<(i64, i64, i64)>> {
        let rows = self.conn.execute(
            "UPDATE task_tracker SET hours = ?1, updated_at = ?2 WHERE tracker_id = ?3",
            params![hours, now, tracker_id],
        )?;
        if rows == 0 {
            return Ok(None);
        }

        let taskid: i64 = self.conn.query_row(
            "SELECT taskid FROM task_tracker WHERE tracker_id = ?1",
            [tracker_id],
            |row| row.get(0),
        )?;

        Ok(Some((tracker_id, taskid, hours)))
    }

    pub fn list_entries_for_task(&self, taskid: i64) -> Result<Vec<TrackerEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT tracker_id, taskid, hours, created_at, updated_at FROM task_tracker WHERE taskid = ?1 ORDER BY tracker_id",
        )?;

        let entries = stmt
            .query_map([taskid], |row| {
                Ok(TrackerEntry {
                    tracker_id: row.get(0)?,
                    taskid: row.get(1)?,
                    hours: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn list_all_entries(&self) -> Result<Vec<TrackerEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT tracker_id, taskid, hours, created_at, updated_at FROM task_tracker ORDER BY tracker_id",
        )?;

        let entries = stmt
            .query_map([], |row| {
                Ok(TrackerEntry {
                    tracker_id: row.get(0)?,
                    taskid: row.get(1)?,
                    hours: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Sum of hours across every entry for the task. Returns 0 both for a
    /// task with no entries and for a task id that does not exist; existence
    /// is deliberately not checked here.
    pub fn total_hours_for_task(&self, taskid: i64) -> Result<i64> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(hours), 0) FROM task_tracker WHERE taskid = ?1",
            [taskid],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// tasks ⋈ task_tracker rows feeding the CSV report: one row per tracker
    /// entry, carrying that entry's hours.
    pub fn list_task_hours(&self) -> Result<Vec<(i64, String, i64)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT t.taskid, t.task_name, tr.hours
            FROM tasks t
            JOIN task_tracker tr ON t.taskid = tr.taskid
            ORDER BY t.taskid, tr.tracker_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(&db_path).unwrap();
        (db, dir)
    }

    fn seed_task(db: &Database) -> i64 {
        let user = db.create_user("alice").unwrap();
        db.create_task(user.uid, "Test task", None).unwrap()
    }

    #[test]
    fn test_create_user_defaults() {
        let (db, _dir) = setup_test_db();
        let user = db.create_user("alice").unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.status, "ACTIVE");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_rename_user() {
        let (db, _dir) = setup_test_db();
        let user = db.create_user("alice").unwrap();
        assert!(db.rename_user(user.uid, "alicia").unwrap());
        let renamed = db.get_user(user.uid).unwrap().unwrap();
        assert_eq!(renamed.name, "alicia");
    }

    #[test]
    fn test_rename_missing_user() {
        let (db, _dir) = setup_test_db();
        assert!(!db.rename_user(99999, "nobody").unwrap());
    }

    #[test]
    fn test_find_user_by_name() {
        let (db, _dir) = setup_test_db();
        let user = db.create_user("bob").unwrap();
        let found = db.find_user_by_name("bob").unwrap().unwrap();
        assert_eq!(found.uid, user.uid);
        assert!(db.find_user_by_name("nobody").unwrap().is_none());
    }

    #[test]
    fn test_create_task_defaults() {
        let (db, _dir) = setup_test_db();
        let user = db.create_user("alice").unwrap();
        let taskid = db.create_task(user.uid, "Write report", Some("quarterly")).unwrap();
        let task = db.get_task(taskid).unwrap().unwrap();
        assert_eq!(task.status, "OPEN");
        assert_eq!(task.uid, user.uid);
        assert_eq!(task.task_description, Some("quarterly".to_string()));
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_update_task_fields() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        assert!(db
            .update_task(taskid, Some("Renamed"), Some("new desc"), Some("IN_PROGRESS"))
            .unwrap());
        let task = db.get_task(taskid).unwrap().unwrap();
        assert_eq!(task.task_name, "Renamed");
        assert_eq!(task.task_description, Some("new desc".to_string()));
        assert_eq!(task.status, "IN_PROGRESS");
    }

    #[test]
    fn test_set_task_status() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        assert!(db.set_task_status(taskid, "PAUSED").unwrap());
        assert_eq!(db.get_task(taskid).unwrap().unwrap().status, "PAUSED");
        assert!(!db.set_task_status(99999, "PAUSED").unwrap());
    }

    #[test]
    fn test_list_tasks_for_user_isolation() {
        let (db, _dir) = setup_test_db();
        let alice = db.create_user("alice").unwrap();
        let bob = db.create_user("bob").unwrap();
        db.create_task(alice.uid, "Alice task", None).unwrap();
        db.create_task(bob.uid, "Bob task", None).unwrap();

        let tasks = db.list_tasks_for_user("alice").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_name, "Alice task");
        assert!(db.list_tasks_for_user("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_delete_task_cascades_entries() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        let entry = db.create_entry(taskid).unwrap();

        assert!(db.delete_task(taskid).unwrap());
        assert!(db.get_task(taskid).unwrap().is_none());
        assert!(db.get_entry(entry.tracker_id).unwrap().is_none());
    }

    #[test]
    fn test_create_entry_defaults() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        let entry = db.create_entry(taskid).unwrap();
        assert_eq!(entry.hours, 0);
        assert_eq!(entry.created_at, entry.updated_at);
        assert_eq!(entry.taskid, taskid);

        let stored = db.get_entry(entry.tracker_id).unwrap().unwrap();
        assert_eq!(stored.hours, 0);
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[test]
    fn test_create_entry_unknown_task_rejected() {
        let (db, _dir) = setup_test_db();
        // FK constraint is the backstop when callers skip the existence check
        assert!(db.create_entry(99999).is_err());
    }

    #[test]
    fn test_recompute_stamps_both_fields() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        let entry = db.create_entry(taskid).unwrap();

        let now = entry.created_at + 2 * 3600 + 600;
        let updated = db
            .recompute_entry_hours(entry.tracker_id, now)
            .unwrap()
            .unwrap();
        assert_eq!(updated.hours, 2);
        assert_eq!(updated.updated_at, now);
        assert_eq!(updated.created_at, entry.created_at);
    }

    #[test]
    fn test_recompute_is_rederivation_not_accumulation() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        let entry = db.create_entry(taskid).unwrap();

        let first = db
            .recompute_entry_hours(entry.tracker_id, entry.created_at + 3 * 3600)
            .unwrap()
            .unwrap();
        assert_eq!(first.hours, 3);

        // A later recompute derives from created_at again, it does not add
        let second = db
            .recompute_entry_hours(entry.tracker_id, entry.created_at + 4 * 3600)
            .unwrap()
            .unwrap();
        assert_eq!(second.hours, 4);
    }

    #[test]
    fn test_recompute_missing_entry() {
        let (db, _dir) = setup_test_db();
        assert!(db.recompute_entry_hours(99999, 1000).unwrap().is_none());
    }

    #[test]
    fn test_recompute_clamps_backdated_clock() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        let entry = db.create_entry(taskid).unwrap();

        let updated = db
            .recompute_entry_hours(entry.tracker_id, entry.created_at - 7200)
            .unwrap()
            .unwrap();
        assert_eq!(updated.hours, 0);
    }

    #[test]
    fn test_assign_entry_hours_returns_triple() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        let entry = db.create_entry(taskid).unwrap();

        let (tracker_id, tid, hours) = db
            .assign_entry_hours(entry.tracker_id, 5, entry.created_at + 60)
            .unwrap()
            .unwrap();
        assert_eq!(tracker_id, entry.tracker_id);
        assert_eq!(tid, taskid);
        assert_eq!(hours, 5);

        let stored = db.get_entry(entry.tracker_id).unwrap().unwrap();
        assert_eq!(stored.hours, 5);
        assert_eq!(stored.updated_at, entry.created_at + 60);
    }

    #[test]
    fn test_assign_missing_entry() {
        let (db, _dir) = setup_test_db();
        assert!(db.assign_entry_hours(99999, 5, 1000).unwrap().is_none());
    }

    #[test]
    fn test_total_hours_zero_entries() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        assert_eq!(db.total_hours_for_task(taskid).unwrap(), 0);
        // Same default for a task id that does not exist at all
        assert_eq!(db.total_hours_for_task(99999).unwrap(), 0);
    }

    #[test]
    fn test_total_hours_additivity() {
        let (db, _dir) = setup_test_db();
        let taskid = seed_task(&db);
        let now = now_timestamp();
        for hours in [3, 7, 2] {
            let entry = db.create_entry(taskid).unwrap();
            db.assign_entry_hours(entry.tracker_id, hours, now).unwrap();
        }
        assert_eq!(db.total_hours_for_task(taskid).unwrap(), 12);
    }

    #[test]
    fn test_total_hours_isolation() {
        let (db, _dir) = setup_test_db();
        let user = db.create_user("alice").unwrap();
        let task_a = db.create_task(user.uid, "A", None).unwrap();
        let task_b = db.create_task(user.uid, "B", None).unwrap();
        let now = now_timestamp();

        let a = db.create_entry(task_a).unwrap();
        db.assign_entry_hours(a.tracker_id, 4, now).unwrap();
        let b = db.create_entry(task_b).unwrap();
        db.assign_entry_hours(b.tracker_id, 9, now).unwrap();

        assert_eq!(db.total_hours_for_task(task_a).unwrap(), 4);
        assert_eq!(db.total_hours_for_task(task_b).unwrap(), 9);
    }

    #[test]
    fn test_list_entries_scoped_to_task() {
        let (db, _dir) = setup_test_db();
        let user = db.create_user("alice").unwrap();
        let task_a = db.create_task(user.uid, "A", None).unwrap();
        let task_b = db.create_task(user.uid, "B", None).unwrap();

        db.create_entry(task_a).unwrap();
        db.create_entry(task_a).unwrap();
        db.create_entry(task_b).unwrap();

        assert_eq!(db.list_entries_for_task(task_a).unwrap().len(), 2);
        assert_eq!(db.list_entries_for_task(task_b).unwrap().len(), 1);
        assert_eq!(db.list_all_entries().unwrap().len(), 3);
        assert!(db.list_entries_for_task(99999).unwrap().is_empty());
    }

    #[test]
    fn test_task_hours_join() {
        let (db, _dir) = setup_test_db();
        let user = db.create_user("alice").unwrap();
        let taskid = db.create_task(user.uid, "Report", None).unwrap();
        let now = now_timestamp();

        let entry = db.create_entry(taskid).unwrap();
        db.assign_entry_hours(entry.tracker_id, 6, now).unwrap();
        // Task without entries does not appear in the join
        db.create_task(user.uid, "Untracked", None).unwrap();

        let rows = db.list_task_hours().unwrap();
        assert_eq!(rows, vec![(taskid, "Report".to_string(), 6)]);
    }
}
