/// Streak calculation for the toggle-today action
///
/// `StreakEngine` is the only code that changes a record's completion
/// history, streak and last-completed date. It is a pure transformation:
/// it takes a record by value plus the calendar day to treat as today and
/// returns the updated record.

use crate::domain::{DateKey, HabitRecord};

/// Pure functions applying a toggle to a habit record
pub struct StreakEngine;

/// Which way a toggle went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Today was added to the history
    Marked,
    /// Today was removed from the history
    Unmarked,
}

impl StreakEngine {
    /// Flip today's completion for a habit
    ///
    /// Marking extends the streak when yesterday is in the history or when
    /// the streak is zero, otherwise a broken chain restarts at 1.
    ///
    /// Un-marking decrements the streak by one without re-walking the
    /// remaining history. If today was not the tip of an unbroken chain the
    /// resulting streak can differ from the longest run ending at the new
    /// last completion. This is accepted behaviour.
    pub fn toggle(record: HabitRecord, today: DateKey) -> HabitRecord {
        Self::toggle_with_outcome(record, today).0
    }

    /// Same as `toggle`, also reporting which direction was applied
    pub fn toggle_with_outcome(mut record: HabitRecord, today: DateKey) -> (HabitRecord, ToggleOutcome) {
        let mut completed_dates = record.completed_dates.clone();

        let outcome = if completed_dates.remove(&today) {
            record.streak = record.streak.saturating_sub(1);
            record.last_completed = completed_dates.iter().next_back().copied();
            ToggleOutcome::Unmarked
        } else {
            let was_yesterday_completed = today
                .previous()
                .map_or(false, |yesterday| completed_dates.contains(&yesterday));

            record.streak = if was_yesterday_completed || record.streak == 0 {
                record.streak.saturating_add(1)
            } else {
                1
            };
            completed_dates.insert(today);
            record.last_completed = completed_dates.iter().next_back().copied();
            ToggleOutcome::Marked
        };

        record.completed_dates = completed_dates;

        tracing::debug!(
            "Toggled habit {} on {}: {:?}, streak now {}",
            record.id,
            today,
            outcome,
            record.streak
        );

        (record, outcome)
    }

    /// Get a motivational message based on current streak length
    pub fn streak_message(streak: u32) -> String {
        match streak {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", streak),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", streak),
            30..=99 => format!("Incredible! {} days of consistency. You're a habit master!", streak),
            _ => format!("Legendary! {} days of unwavering commitment. You're an inspiration!", streak),
        }
    }
}
