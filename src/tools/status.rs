/// Tool for checking habit status and streaks
///
/// This module implements the habit_status MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, HabitRecord, StreakEngine};
use crate::tools::{days, parse_habit_id};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for checking habit status
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// ID of a specific habit (optional - shows all if omitted)
    pub habit_id: Option<String>,
}

/// Information about a single habit's status
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub habit_id: String,
    pub name: String,
    pub current_streak: u32,
    pub last_completed: Option<String>,
    pub completed_today: bool,
    pub reminder: Option<String>,
    pub status: String, // "done_today", "pending" or "new"
    pub encouragement: String,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitStatus>,
    pub summary: String,
    pub message: String,
}

impl HabitStatus {
    fn from_record(habit: &HabitRecord, today: &DateKey) -> Self {
        let completed_today = habit.is_completed_on(today);
        let status = if completed_today {
            "done_today"
        } else if habit.completed_dates.is_empty() {
            "new"
        } else {
            "pending"
        };

        Self {
            habit_id: habit.id.to_string(),
            name: habit.name.clone(),
            current_streak: habit.streak,
            last_completed: habit.last_completed.map(|d| d.to_string()),
            completed_today,
            reminder: habit.reminder.map(|r| r.to_string()),
            status: status.to_string(),
            encouragement: StreakEngine::streak_message(habit.streak),
        }
    }
}

/// Get status for one habit or all of them
pub fn get_habit_status(
    server: &HabitTrackerServer,
    params: StatusParams,
) -> Result<StatusResponse, ServerError> {
    get_habit_status_on(server, params, DateKey::today())
}

pub(crate) fn get_habit_status_on(
    server: &HabitTrackerServer,
    params: StatusParams,
    today: DateKey,
) -> Result<StatusResponse, ServerError> {
    let habits: Vec<HabitStatus> = match params.habit_id {
        Some(raw_id) => {
            let habit_id = parse_habit_id(&raw_id)?;
            let habit = server.habits().get(&habit_id)?;
            vec![HabitStatus::from_record(habit, &today)]
        }
        None => server
            .habits()
            .iter()
            .map(|habit| HabitStatus::from_record(habit, &today))
            .collect(),
    };

    let summary = if habits.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        let done = habits.iter().filter(|h| h.completed_today).count();
        format!("📊 Status for {}: {} of {} habits done today", today, done, habits.len())
    };

    let details = habits
        .iter()
        .map(|h| {
            let mut line = format!(
                "{} {}\n   Streak: {} {}",
                if h.completed_today { "✅" } else { "⬜" },
                h.name,
                h.current_streak,
                days(h.current_streak)
            );
            if let Some(last) = &h.last_completed {
                line.push_str(&format!(" | Last completed: {}", last));
            }
            if let Some(reminder) = &h.reminder {
                line.push_str(&format!(" | Reminder: {}", reminder));
            }
            line.push_str(&format!("\n   {}", h.encouragement));
            line
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let message = if details.is_empty() {
        summary.clone()
    } else {
        format!("{}\n\n{}", summary, details)
    };

    Ok(StatusResponse {
        habits,
        summary,
        message,
    })
}
