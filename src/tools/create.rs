/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Color, ReminderTime};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Display color token, e.g. "#10b981" (defaults to "#8b5cf6")
    pub color: Option<String>,
    /// Daily reminder time as HH:MM (optional)
    pub reminder: Option<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: String,
    pub message: String,
}

/// Create a new habit and persist it
pub fn create_habit(
    server: &mut HabitTrackerServer,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ServerError> {
    let color = Color::or_default(params.color.as_deref())?;
    let reminder = ReminderTime::parse_optional(params.reminder.as_deref())?;

    let habit = server.create_habit(&params.name, color, reminder)?;

    let reminder_note = match habit.reminder {
        Some(time) => format!(" Reminder set for {}.", time),
        None => String::new(),
    };

    Ok(CreateHabitResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!("✅ Created habit '{}'! Ready to start your streak!{}", habit.name, reminder_note),
    })
}
