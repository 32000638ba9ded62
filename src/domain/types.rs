/// Core value types used by habit records
///
/// This module defines the identifier, color token and reminder time that a
/// `HabitRecord` carries alongside its completion history.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// Opaque to everything except equality. New habits get a UUID v4; records
/// loaded from storage keep whatever non-empty id they were saved with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HabitId(String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Habit ID cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<String> for HabitId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_string(&s)
    }
}

impl From<HabitId> for String {
    fn from(id: HabitId) -> Self {
        id.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Suggested display colors, first entry is the default
pub const PALETTE: [&str; 10] = [
    "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#3b82f6",
    "#ef4444", "#06b6d4", "#f97316", "#a855f7", "#14b8a6",
];

/// Display color token
///
/// The core never interprets it; any non-blank token is accepted so that
/// clients can use names, hex codes or their own palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn new(token: &str) -> Result<Self, DomainError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Color cannot be blank"));
        }
        if trimmed.len() > 32 {
            return Err(DomainError::validation("Color cannot be longer than 32 characters"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Use the given token, or the default palette color when absent
    pub fn or_default(token: Option<&str>) -> Result<Self, DomainError> {
        match token {
            Some(t) => Self::new(t),
            None => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(PALETTE[0].to_string())
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(&token)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Time of day for a daily reminder, minute resolution, no timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::validation(format!(
                "Invalid reminder time {}:{}, hour must be 0-23 and minute 0-59",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Truncate a wall-clock time to its minute
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// The current local wall-clock minute
    pub fn now() -> Self {
        Self::from_time(chrono::Local::now().time())
    }

    /// Parse an optional reminder where an empty string means "no reminder"
    pub fn parse_optional(s: Option<&str>) -> Result<Option<Self>, DomainError> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some),
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation(format!("Invalid reminder time '{}', expected HH:MM", s));
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(hour) || !digits(minute) || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
