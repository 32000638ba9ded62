/// Storage layer for persisting habit data
///
/// This module defines the load/save boundary the tracker uses after every
/// mutation, plus two implementations: SQLite and a single JSON file.

pub mod sqlite;
pub mod migrations;
pub mod json;

// Re-export the main storage types
pub use sqlite::*;
pub use json::*;

use thiserror::Error;
use crate::domain::HabitRecord;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
///
/// The whole collection is loaded at startup and written back after each
/// change. `save` replaces everything previously stored and must keep the
/// order of the slice it is given.
pub trait HabitStorage {
    /// Load every stored habit in collection order
    fn load(&self) -> Result<Vec<HabitRecord>, StorageError>;

    /// Replace the stored habits with the given sequence
    fn save(&self, habits: &[HabitRecord]) -> Result<(), StorageError>;
}
