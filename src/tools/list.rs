/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, DomainError, HabitRecord};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Sort by: "created" (default), "name" or "streak"
    pub sort_by: Option<String>,
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub color: String,
    pub current_streak: u32,
    pub last_completed: Option<String>,
    pub completed_today: bool,
    pub reminder: Option<String>,
    pub total_completions: usize,
}

/// Summary statistics for all habits
#[derive(Debug, Serialize)]
pub struct HabitListSummary {
    pub total_habits: usize,
    pub completed_today: usize,
    pub longest_current_streak: u32,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub summary: HabitListSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortBy {
    Created,
    Name,
    Streak,
}

impl SortBy {
    fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("created") => Ok(SortBy::Created),
            Some("name") => Ok(SortBy::Name),
            Some("streak") => Ok(SortBy::Streak),
            Some(other) => Err(DomainError::validation(format!(
                "Invalid sort_by '{}'. Valid options: created, name, streak",
                other
            ))),
        }
    }
}

/// List habits with their streak state
pub fn list_habits(
    server: &HabitTrackerServer,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ServerError> {
    list_habits_on(server, params, DateKey::today())
}

pub(crate) fn list_habits_on(
    server: &HabitTrackerServer,
    params: ListHabitsParams,
    today: DateKey,
) -> Result<ListHabitsResponse, ServerError> {
    let sort_by = SortBy::parse(params.sort_by.as_deref())?;

    let mut records: Vec<&HabitRecord> = server.habits().iter().collect();
    match sort_by {
        SortBy::Created => {}
        SortBy::Name => records.sort_by_key(|h| h.name.to_lowercase()),
        // Stable sort keeps collection order among equal streaks
        SortBy::Streak => records.sort_by(|a, b| b.streak.cmp(&a.streak)),
    }

    let habits: Vec<HabitSummary> = records
        .into_iter()
        .map(|habit| HabitSummary {
            habit_id: habit.id.to_string(),
            name: habit.name.clone(),
            color: habit.color.to_string(),
            current_streak: habit.streak,
            last_completed: habit.last_completed.map(|d| d.to_string()),
            completed_today: habit.is_completed_on(&today),
            reminder: habit.reminder.map(|r| r.to_string()),
            total_completions: habit.total_completions(),
        })
        .collect();

    let summary = HabitListSummary {
        total_habits: habits.len(),
        completed_today: habits.iter().filter(|h| h.completed_today).count(),
        longest_current_streak: habits.iter().map(|h| h.current_streak).max().unwrap_or(0),
    };

    Ok(ListHabitsResponse { habits, summary })
}
