/// Integration tests for the habit tracker server
mod persistence;
mod reminders;
