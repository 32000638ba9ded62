/// Habit record entity
///
/// This module defines `HabitRecord`, the single entity the tracker stores:
/// display fields the user edits, and completion fields that only the
/// streak engine changes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Color, DateKey, DomainError, HabitId, ReminderTime};

/// Longest accepted habit name, counted after trimming
pub const MAX_NAME_LEN: usize = 100;

/// A daily habit and its completion history
///
/// `completed_dates` is a sorted set, so uniqueness and ascending order hold
/// by construction. `last_completed` always mirrors its maximum element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    /// Unique identifier, fixed at creation
    pub id: HabitId,
    /// Display name (e.g., "Drink water", "Read")
    pub name: String,
    /// Display color token
    pub color: Color,
    /// Consecutive-day count as of the last toggle
    pub streak: u32,
    /// Most recent completed day, None when never completed
    pub last_completed: Option<DateKey>,
    /// Every day the habit was marked done
    pub completed_dates: BTreeSet<DateKey>,
    /// Optional daily reminder time
    pub reminder: Option<ReminderTime>,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl HabitRecord {
    /// Create a new habit with validation
    ///
    /// New habits start with an empty history and a zero streak.
    pub fn new(
        name: &str,
        color: Color,
        reminder: Option<ReminderTime>,
    ) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            color,
            streak: 0,
            last_completed: None,
            completed_dates: BTreeSet::new(),
            reminder,
            created_at: Utc::now(),
        })
    }

    /// Create a habit from existing data (used when loading from storage)
    ///
    /// Field values are taken as stored; `HabitCollection::from_records`
    /// re-derives `last_completed` if it disagrees with the date set.
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: HabitId,
        name: String,
        color: Color,
        streak: u32,
        last_completed: Option<DateKey>,
        completed_dates: BTreeSet<DateKey>,
        reminder: Option<ReminderTime>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            color,
            streak,
            last_completed,
            completed_dates,
            reminder,
            created_at,
        }
    }

    /// Replace the user-editable fields
    ///
    /// Completion history, streak and last-completed date are left alone.
    pub fn edit(
        &mut self,
        name: &str,
        color: Color,
        reminder: Option<ReminderTime>,
    ) -> Result<(), DomainError> {
        self.name = Self::validate_name(name)?;
        self.color = color;
        self.reminder = reminder;
        Ok(())
    }

    /// Whether the habit was marked done on the given day
    pub fn is_completed_on(&self, day: &DateKey) -> bool {
        self.completed_dates.contains(day)
    }

    /// The most recent completed day according to the date set
    pub fn latest_completion(&self) -> Option<DateKey> {
        self.completed_dates.iter().next_back().copied()
    }

    /// Number of days the habit has been marked done
    pub fn total_completions(&self) -> usize {
        self.completed_dates.len()
    }

    /// Validate a habit name and return its trimmed form
    pub(crate) fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::validation("Habit name cannot be empty"));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "Habit name cannot be longer than {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(trimmed.to_string())
    }
}
