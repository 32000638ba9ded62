/// Tool for marking or un-marking today's completion
///
/// This module implements the habit_toggle MCP tool. Only the current
/// local day can be toggled.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, StreakEngine};
use crate::tools::{days, parse_habit_id};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for toggling a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleHabitParams {
    /// ID of the habit to mark done (or undo) for today
    pub habit_id: String,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub success: bool,
    pub completed_today: bool,
    pub current_streak: u32,
    pub message: String,
}

/// Toggle today's completion for a habit
pub fn toggle_habit(
    server: &mut HabitTrackerServer,
    params: ToggleHabitParams,
) -> Result<ToggleHabitResponse, ServerError> {
    toggle_habit_on(server, params, DateKey::today())
}

/// Toggle with an explicit calendar day standing in for today
pub(crate) fn toggle_habit_on(
    server: &mut HabitTrackerServer,
    params: ToggleHabitParams,
    today: DateKey,
) -> Result<ToggleHabitResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = server.toggle_habit_on(&habit_id, today)?;
    let completed_today = habit.is_completed_on(&today);

    let message = if completed_today {
        format!(
            "🔥 Marked '{}' done for {}! Current streak: {} {}\n{}",
            habit.name,
            today,
            habit.streak,
            days(habit.streak),
            StreakEngine::streak_message(habit.streak)
        )
    } else {
        format!(
            "↩️ Unmarked '{}' for {}. Current streak: {} {}",
            habit.name,
            today,
            habit.streak,
            days(habit.streak)
        )
    };

    Ok(ToggleHabitResponse {
        success: true,
        completed_today,
        current_streak: habit.streak,
        message,
    })
}
