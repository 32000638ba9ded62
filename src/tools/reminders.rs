/// Tool for checking which reminders are due
///
/// This module implements the habit_reminders MCP tool, a read-only view of
/// the same predicate the reminder scheduler polls.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, ReminderTime};
use crate::reminders::{due_reminders, Reminder};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for checking due reminders
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct RemindersParams {
    /// Time of day to check as HH:MM (optional - defaults to now)
    pub at: Option<String>,
}

/// A reminder that would fire at the requested time
#[derive(Debug, Serialize)]
pub struct DueReminder {
    pub habit_id: String,
    pub title: String,
    pub body: String,
}

/// Response from checking reminders
#[derive(Debug, Serialize)]
pub struct RemindersResponse {
    pub at: String,
    pub due: Vec<DueReminder>,
    pub message: String,
}

/// List the reminders due at a given minute today
pub fn get_due_reminders(
    server: &HabitTrackerServer,
    params: RemindersParams,
) -> Result<RemindersResponse, ServerError> {
    let now = match ReminderTime::parse_optional(params.at.as_deref())? {
        Some(time) => time,
        None => ReminderTime::now(),
    };
    get_due_reminders_on(server, now, DateKey::today())
}

pub(crate) fn get_due_reminders_on(
    server: &HabitTrackerServer,
    now: ReminderTime,
    today: DateKey,
) -> Result<RemindersResponse, ServerError> {
    let due: Vec<DueReminder> = due_reminders(server.habits(), now, &today)
        .into_iter()
        .map(|habit| {
            let reminder = Reminder::for_habit(habit);
            DueReminder {
                habit_id: reminder.habit_id.to_string(),
                title: reminder.title,
                body: reminder.body,
            }
        })
        .collect();

    let message = if due.is_empty() {
        format!("No reminders due at {}", now)
    } else {
        let lines: Vec<String> = due.iter().map(|r| format!("🔔 {}", r.body)).collect();
        format!("Reminders due at {}:\n{}", now, lines.join("\n"))
    };

    Ok(RemindersResponse {
        at: now.to_string(),
        due,
        message,
    })
}
