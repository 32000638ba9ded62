/// Calendar-day keys
///
/// A `DateKey` names a day in the local calendar, independent of time of day.
/// Its text form is `YYYY-MM-DD`, which sorts the same way the days do.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::DomainError;

/// Text format shared by display, parsing and storage
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical identifier for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap an existing calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month and day, if they name a real date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The current day in the local calendar
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The day before `today()`
    pub fn yesterday() -> Self {
        let today = Self::today();
        today.previous().unwrap_or(today)
    }

    /// The calendar day before this one (None only at the minimum date)
    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The calendar day after this one (None only at the maximum date)
    pub fn next(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// True iff `b` is exactly one calendar day after `a`
    pub fn adjacent(a: &DateKey, b: &DateKey) -> bool {
        a.next().as_ref() == Some(b)
    }

    /// The underlying chrono date
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
