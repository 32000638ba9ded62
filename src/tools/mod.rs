/// MCP tools for habit management
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to interact with the habit tracker.

pub mod create;
pub mod update;
pub mod delete;
pub mod toggle;
pub mod list;
pub mod status;
pub mod reminders;

// Re-export tool functions for easy access
pub use create::*;
pub use update::*;
pub use delete::*;
pub use toggle::*;
pub use list::*;
pub use status::*;
pub use reminders::*;

use crate::domain::HabitId;
use crate::ServerError;

/// Parse a habit id argument, rejecting blank ids as a validation error
fn parse_habit_id(raw: &str) -> Result<HabitId, ServerError> {
    Ok(HabitId::from_string(raw)?)
}

/// "day" or "days" for a count
fn days(count: u32) -> &'static str {
    if count == 1 { "day" } else { "days" }
}
