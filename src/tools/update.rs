/// Tool for updating existing habits
///
/// This module implements the habit_update MCP tool to modify a habit's
/// name, color and reminder. Completion history is never touched here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Color, ReminderTime};
use crate::tools::parse_habit_id;
use crate::{HabitTrackerServer, ServerError};

/// Parameters for updating an existing habit
///
/// Omitted fields keep their current value. An empty reminder clears it.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// ID of the habit to update
    pub habit_id: String,
    /// New name (optional)
    pub name: Option<String>,
    /// New color token (optional)
    pub color: Option<String>,
    /// New reminder as HH:MM, or "" to remove it (optional)
    pub reminder: Option<String>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Update an existing habit
pub fn update_habit(
    server: &mut HabitTrackerServer,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let current = server.habits().get(&habit_id)?.clone();

    let name = params.name.unwrap_or(current.name);
    let color = match params.color {
        Some(token) => Color::new(&token)?,
        None => current.color,
    };
    let reminder = match params.reminder {
        Some(text) => ReminderTime::parse_optional(Some(&text))?,
        None => current.reminder,
    };

    let habit = server.update_habit(&habit_id, &name, color, reminder)?;

    Ok(UpdateHabitResponse {
        success: true,
        message: format!("✅ Updated habit '{}'", habit.name),
    })
}
