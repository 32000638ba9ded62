/// Domain module containing core business logic and data types
///
/// This module defines the habit record, the calendar-day key used for
/// completion tracking, the streak engine that applies a toggle, and the
/// ordered collection that the rest of the crate mutates.

pub mod date;
pub mod types;
pub mod habit;
pub mod streak;
pub mod collection;

// Re-export public types for easy access
pub use date::*;
pub use types::*;
pub use habit::*;
pub use streak::*;
pub use collection::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Habit not found: {habit_id}")]
    NotFound { habit_id: String },
}

impl DomainError {
    /// Shorthand for building a validation error from any message
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}
