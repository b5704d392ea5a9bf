use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mytime::commands;
use mytime::db::Database;
use mytime::hours::UpdateStrategy;

#[derive(Parser)]
#[command(name = "mytime")]
#[command(about = "Track hours worked on tasks, per user and per session")]
#[command(version)]
struct Cli {
    /// How 'tracker update' derives hours: elapsed (recompute from the
    /// session's own timestamps) or assigned (persist the supplied value)
    #[arg(long, env = "MYTIME_STRATEGY", default_value = "elapsed", global = true)]
    strategy: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize mytime in the current directory
    Init,

    /// User management
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Task management
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },

    /// Work-session tracking
    Tracker {
        #[command(subcommand)]
        action: TrackerCommands,
    },

    /// Export tracked hours as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Add a user
    Add {
        /// User name (unique)
        name: String,
    },
    /// Rename a user
    Rename {
        /// User ID
        uid: i64,
        /// New name
        name: String,
    },
    /// List users
    List,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task owned by a user
    Add {
        /// Owner's username
        username: String,
        /// Task name
        name: String,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update a task's name, description, or status
    Update {
        /// Task ID
        taskid: i64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New status (OPEN, IN_PROGRESS, PAUSED, STALE, CLOSED, DELETED)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Set a task's status
    Status {
        /// Task ID
        taskid: i64,
        /// New status
        status: String,
    },
    /// List tasks, optionally for one user
    List {
        /// Filter by owner's username
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Delete a task and its tracker entries
    Delete {
        /// Task ID
        taskid: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum TrackerCommands {
    /// Start a work session against a task
    Start {
        /// Task ID
        taskid: i64,
    },
    /// Update a session's hours under the configured strategy
    Update {
        /// Tracker entry ID
        tracker_id: i64,
        /// Hours to assign (assigned strategy only)
        #[arg(long)]
        hours: Option<i64>,
    },
    /// List tracker entries, optionally for one task
    List {
        /// Task ID
        taskid: Option<i64>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Total hours logged against a task
    Total {
        /// Task ID
        taskid: i64,
    },
}

fn find_mytime_dir() -> Result<PathBuf> {
    let mut current = env::current_dir()?;

    loop {
        let candidate = current.join(commands::init::DATA_DIR);
        if candidate.exists() && candidate.is_dir() {
            return Ok(candidate);
        }

        if !current.pop() {
            bail!("Not a mytime directory (or any parent). Run 'mytime init' first.");
        }
    }
}

fn get_db() -> Result<Database> {
    let mytime_dir = find_mytime_dir()?;
    let db_path = mytime_dir.join(commands::init::DB_FILE);
    Database::open(&db_path).context("Failed to open database")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let strategy: UpdateStrategy = cli.strategy.parse()?;

    match cli.command {
        Commands::Init => {
            let cwd = env::current_dir()?;
            commands::init::run(&cwd)
        }

        Commands::User { action } => {
            let db = get_db()?;
            match action {
                UserCommands::Add { name } => commands::user::add(&db, &name),
                UserCommands::Rename { uid, name } => commands::user::rename(&db, uid, &name),
                UserCommands::List => commands::user::list(&db),
            }
        }

        Commands::Task { action } => {
            let db = get_db()?;
            match action {
                TaskCommands::Add {
                    username,
                    name,
                    description,
                } => commands::task::add(&db, &username, &name, description.as_deref()),
                TaskCommands::Update {
                    taskid,
                    name,
                    description,
                    status,
                } => commands::task::update(
                    &db,
                    taskid,
                    name.as_deref(),
                    description.as_deref(),
                    status.as_deref(),
                ),
                TaskCommands::Status { taskid, status } => {
                    commands::task::set_status(&db, taskid, &status)
                }
                TaskCommands::List { username } => {
                    commands::task::list(&db, username.as_deref())
                }
                TaskCommands::Delete { taskid, force } => {
                    commands::task::delete(&db, taskid, force)
                }
            }
        }

        Commands::Tracker { action } => {
            let db = get_db()?;
            match action {
                TrackerCommands::Start { taskid } => {
                    commands::tracker::start(&db, strategy, taskid)
                }
                TrackerCommands::Update { tracker_id, hours } => {
                    commands::tracker::update(&db, strategy, tracker_id, hours)
                }
                TrackerCommands::List { taskid, json } => {
                    commands::tracker::list(&db, strategy, taskid, json)
                }
                TrackerCommands::Total { taskid } => {
                    commands::tracker::total(&db, strategy, taskid)
                }
            }
        }

        Commands::Export { output } => {
            let db = get_db()?;
            commands::export::run(&db, output.as_deref())
        }
    }
}
