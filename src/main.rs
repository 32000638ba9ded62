/// habit-streak-mcp binary
///
/// Parses flags, configures logging on stderr, opens the habit store and
/// serves MCP over stdin/stdout until the client disconnects.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use habit_streak_mcp::{
    HabitStorage, HabitTrackerServer, JsonFileStorage, RunOptions, SqliteStorage,
};

/// Which storage backend holds the habit collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageBackend {
    /// SQLite database file
    Sqlite,
    /// Single JSON document
    Json,
}

impl StorageBackend {
    fn default_file_name(self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "habits.db",
            StorageBackend::Json => "habits.json",
        }
    }
}

/// Pick a writable data directory
///
/// Candidates are tried in order: `~/.habit_streaks`, the platform data dir,
/// the platform config dir, then `./.habit_streaks`. The system temp dir is
/// the last resort.
fn get_default_data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".habit_streaks")),
        dirs::data_dir().map(|p| p.join("habit_streaks")),
        dirs::config_dir().map(|p| p.join("habit_streaks")),
        std::env::current_dir().ok().map(|p| p.join(".habit_streaks")),
    ];

    if let Some(dir) = candidates.into_iter().flatten().find(|dir| is_writable_dir(dir)) {
        return Ok(dir);
    }

    let fallback = std::env::temp_dir().join("habit_streaks");
    std::fs::create_dir_all(&fallback)?;
    tracing::warn!("Using temporary directory for habit data: {}", fallback.display());
    Ok(fallback)
}

/// Create `dir` if needed and probe it with a throwaway file
fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(".write_probe");
    let writable = std::fs::write(&probe, b"").is_ok();
    let _ = std::fs::remove_file(&probe);
    writable
}

/// Command line arguments for the Habit Streak MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the habit data file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Storage backend for the habit data file
    #[arg(long, value_enum, default_value_t = StorageBackend::Sqlite)]
    storage: StorageBackend,

    /// Seconds between reminder checks
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    reminder_interval: u64,

    /// Disable the reminder poller
    #[arg(long)]
    no_reminders: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // RUST_LOG wins over the command line flags when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("habit_streak_mcp={}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting Habit Streak MCP server");

    let data_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_data_dir()?.join(args.storage.default_file_name()),
    };

    info!("Using {:?} storage at: {}", args.storage, data_path.display());

    let storage: Box<dyn HabitStorage + Send> = match args.storage {
        StorageBackend::Sqlite => Box::new(SqliteStorage::new(&data_path)?),
        StorageBackend::Json => Box::new(JsonFileStorage::new(data_path)?),
    };

    let server = HabitTrackerServer::new(storage)?;

    let options = RunOptions {
        reminder_interval: if args.no_reminders {
            None
        } else {
            Some(Duration::from_secs(args.reminder_interval))
        },
    };

    server.run(options).await?;

    info!("Habit Streak MCP server shutdown complete");
    Ok(())
}
