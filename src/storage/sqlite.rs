/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habit data. It handles all SQL queries and data conversion.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::domain::{Color, DateKey, HabitId, HabitRecord, ReminderTime};
use crate::storage::{migrations, HabitStorage, StorageError};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// the load/save operations defined in the HabitStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

/// Raw column values of one `habits` row before decoding
struct HabitRow {
    id: String,
    name: String,
    color: String,
    streak: u32,
    last_completed: Option<String>,
    reminder: Option<String>,
    created_at: String,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::with_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Create a storage backed by a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Load all completion days grouped by habit id
    fn load_completions(&self) -> Result<HashMap<String, BTreeSet<DateKey>>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT habit_id, completed_on FROM habit_completions ORDER BY habit_id, completed_on",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut completions: HashMap<String, BTreeSet<DateKey>> = HashMap::new();
        for row in rows {
            let (habit_id, completed_on) = row?;
            let day = parse_date(&completed_on)?;
            completions.entry(habit_id).or_default().insert(day);
        }

        Ok(completions)
    }

    /// Turn a raw row plus its completion days into a record
    fn decode_habit(row: HabitRow, completed_dates: BTreeSet<DateKey>) -> Result<HabitRecord, StorageError> {
        let id = HabitId::from_string(&row.id)
            .map_err(|e| StorageError::Corrupt(format!("habit id '{}': {}", row.id, e)))?;

        let color = Color::new(&row.color)
            .map_err(|e| StorageError::Corrupt(format!("color of habit {}: {}", id, e)))?;

        let last_completed = row.last_completed.as_deref().map(parse_date).transpose()?;

        let reminder = row
            .reminder
            .as_deref()
            .map(|s| s.parse::<ReminderTime>())
            .transpose()
            .map_err(|e| StorageError::Corrupt(format!("reminder of habit {}: {}", id, e)))?;

        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| StorageError::Corrupt(format!("created_at of habit {}: {}", id, e)))?
            .with_timezone(&Utc);

        Ok(HabitRecord::from_existing(
            id,
            row.name,
            color,
            row.streak,
            last_completed,
            completed_dates,
            reminder,
            created_at,
        ))
    }
}

fn parse_date(s: &str) -> Result<DateKey, StorageError> {
    s.parse()
        .map_err(|e| StorageError::Corrupt(format!("date '{}': {}", s, e)))
}

impl HabitStorage for SqliteStorage {
    /// Load all habits ordered by their position in the collection
    fn load(&self) -> Result<Vec<HabitRecord>, StorageError> {
        let mut completions = self.load_completions()?;

        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, streak, last_completed, reminder, created_at
             FROM habits ORDER BY position ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(HabitRow {
                id: row.get(0)?,
                name: row.get(1)?,
                color: row.get(2)?,
                streak: row.get(3)?,
                last_completed: row.get(4)?,
                reminder: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;

        let mut habits = Vec::new();
        for row in rows {
            let row = row?;
            let dates = completions.remove(&row.id).unwrap_or_default();
            habits.push(Self::decode_habit(row, dates)?);
        }

        tracing::debug!("Loaded {} habits from SQLite", habits.len());
        Ok(habits)
    }

    /// Replace all stored habits inside a single transaction
    fn save(&self, habits: &[HabitRecord]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM habit_completions", [])?;
        tx.execute("DELETE FROM habits", [])?;

        {
            let mut insert_habit = tx.prepare(
                "INSERT INTO habits (
                    id, position, name, color, streak, last_completed, reminder, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            let mut insert_completion = tx.prepare(
                "INSERT INTO habit_completions (habit_id, completed_on) VALUES (?1, ?2)",
            )?;

            for (position, habit) in habits.iter().enumerate() {
                insert_habit.execute(params![
                    habit.id.as_str(),
                    position as i64,
                    habit.name,
                    habit.color.as_str(),
                    habit.streak,
                    habit.last_completed.map(|d| d.to_string()),
                    habit.reminder.map(|r| r.to_string()),
                    habit.created_at.to_rfc3339(),
                ])?;

                for day in &habit.completed_dates {
                    insert_completion.execute(params![habit.id.as_str(), day.to_string()])?;
                }
            }
        }

        tx.commit()?;

        tracing::debug!("Saved {} habits to SQLite", habits.len());
        Ok(())
    }
}
