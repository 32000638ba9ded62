/// Public library interface for the Habit Streak MCP server
///
/// This module exports the domain types, the storage implementations and
/// `HabitTrackerServer`, which ties a habit collection to a store and
/// persists every change.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

// Internal modules
mod domain;
mod storage;
mod reminders;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{HabitStorage, JsonFileStorage, SqliteStorage, StorageError};
pub use reminders::{
    due_reminders, should_notify, LogNotifier, Notifier, NotifyError, Reminder,
    ReminderScheduler, DEFAULT_POLL_INTERVAL,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("{0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for `HabitTrackerServer::run`
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Reminder poll period, None disables reminders
    pub reminder_interval: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            reminder_interval: Some(DEFAULT_POLL_INTERVAL),
        }
    }
}

/// Habit collection bound to a storage backend
///
/// Every mutation runs against a copy of the collection, which is saved
/// and only then replaces the in-memory state. A failed save leaves the
/// collection exactly as it was.
pub struct HabitTrackerServer {
    storage: Box<dyn HabitStorage + Send>,
    habits: HabitCollection,
}

impl HabitTrackerServer {
    /// Create a server from a storage backend, loading the stored habits
    pub fn new(storage: Box<dyn HabitStorage + Send>) -> Result<Self, ServerError> {
        let habits = HabitCollection::from_records(storage.load()?)?;
        tracing::info!("Habit tracker loaded {} existing habits", habits.len());

        Ok(Self { storage, habits })
    }

    pub fn habits(&self) -> &HabitCollection {
        &self.habits
    }

    pub fn create_habit(
        &mut self,
        name: &str,
        color: Color,
        reminder: Option<ReminderTime>,
    ) -> Result<HabitRecord, ServerError> {
        self.commit(|habits| habits.create(name, color, reminder))
    }

    pub fn update_habit(
        &mut self,
        id: &HabitId,
        name: &str,
        color: Color,
        reminder: Option<ReminderTime>,
    ) -> Result<HabitRecord, ServerError> {
        self.commit(|habits| habits.update(id, name, color, reminder))
    }

    pub fn delete_habit(&mut self, id: &HabitId) -> Result<HabitRecord, ServerError> {
        self.commit(|habits| habits.delete(id))
    }

    /// Toggle today's completion in the local calendar
    pub fn toggle_habit_today(&mut self, id: &HabitId) -> Result<HabitRecord, ServerError> {
        self.toggle_habit_on(id, DateKey::today())
    }

    /// Toggle completion for the given day treated as today
    pub fn toggle_habit_on(&mut self, id: &HabitId, today: DateKey) -> Result<HabitRecord, ServerError> {
        self.commit(|habits| habits.toggle_on(id, today))
    }

    /// Apply a change to a copy, persist it, then make it current
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut HabitCollection) -> Result<T, DomainError>,
    ) -> Result<T, ServerError> {
        let mut next = self.habits.clone();
        let result = change(&mut next)?;

        if let Err(e) = self.storage.save(next.records()) {
            tracing::error!("Failed to save habits, change discarded: {}", e);
            return Err(e.into());
        }

        self.habits = next;
        Ok(result)
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// The reminder scheduler, when enabled, runs alongside and is stopped
    /// when stdin closes.
    pub async fn run(self, options: RunOptions) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let shared = Arc::new(Mutex::new(self));

        let scheduler = options.reminder_interval.map(|interval| {
            ReminderScheduler::new(shared.clone(), Arc::new(LogNotifier), interval).spawn()
        });

        let mut mcp_server = mcp::McpServer::new(shared);
        let result = mcp_server.run().await;

        if let Some(handle) = scheduler {
            handle.abort();
        }

        result
    }
}
