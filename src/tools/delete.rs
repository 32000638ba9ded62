/// Tool for deleting habits
///
/// This module implements the habit_delete MCP tool. Deletion is permanent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::parse_habit_id;
use crate::{HabitTrackerServer, ServerError};

/// Parameters for deleting a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID of the habit to delete
    pub habit_id: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Remove a habit and its history
pub fn delete_habit(
    server: &mut HabitTrackerServer,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let removed = server.delete_habit(&habit_id)?;

    Ok(DeleteHabitResponse {
        success: true,
        message: format!("🗑️ Deleted habit '{}'", removed.name),
    })
}
