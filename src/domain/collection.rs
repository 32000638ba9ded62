/// Ordered collection of habit records
///
/// `HabitCollection` is the CRUD surface callers use. It keeps records in
/// insertion order, guarantees ids are unique, and routes every completion
/// change through `StreakEngine`.

use std::collections::HashSet;

use crate::domain::{
    Color, DateKey, DomainError, HabitId, HabitRecord, ReminderTime, StreakEngine,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitCollection {
    habits: Vec<HabitRecord>,
}

impl HabitCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a collection from stored records
    ///
    /// Duplicate ids and blank or overlong names are rejected. A stored
    /// `last_completed` that disagrees with the date set is replaced by the
    /// set's maximum, and a streak with no completed days is reset to 0.
    pub fn from_records(records: Vec<HabitRecord>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        let mut habits = Vec::with_capacity(records.len());

        for mut record in records {
            if !seen.insert(record.id.clone()) {
                return Err(DomainError::validation(format!(
                    "Duplicate habit id in stored data: {}",
                    record.id
                )));
            }

            record.name = HabitRecord::validate_name(&record.name).map_err(|e| match e {
                DomainError::Validation(msg) => {
                    DomainError::validation(format!("Stored habit {}: {}", record.id, msg))
                }
                other => other,
            })?;

            if record.completed_dates.is_empty() && record.streak > 0 {
                tracing::warn!(
                    "Habit {} had streak {} with no completed days, resetting",
                    record.id,
                    record.streak
                );
                record.streak = 0;
            }

            let latest = record.latest_completion();
            if record.last_completed != latest {
                tracing::warn!(
                    "Habit {} had last completed {:?} but latest completion is {:?}, correcting",
                    record.id,
                    record.last_completed.map(|d| d.to_string()),
                    latest.map(|d| d.to_string())
                );
                record.last_completed = latest;
            }

            habits.push(record);
        }

        Ok(Self { habits })
    }

    /// Create a habit and append it to the end of the collection
    pub fn create(
        &mut self,
        name: &str,
        color: Color,
        reminder: Option<ReminderTime>,
    ) -> Result<HabitRecord, DomainError> {
        let habit = HabitRecord::new(name, color, reminder)?;
        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        self.habits.push(habit.clone());
        Ok(habit)
    }

    /// Replace a habit's name, color and reminder
    pub fn update(
        &mut self,
        id: &HabitId,
        name: &str,
        color: Color,
        reminder: Option<ReminderTime>,
    ) -> Result<HabitRecord, DomainError> {
        let habit = self.get_mut(id)?;
        habit.edit(name, color, reminder)?;
        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(habit.clone())
    }

    /// Remove a habit permanently
    pub fn delete(&mut self, id: &HabitId) -> Result<HabitRecord, DomainError> {
        let index = self.position(id)?;
        let removed = self.habits.remove(index);
        tracing::debug!("Deleted habit: {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Toggle today's completion in the local calendar
    pub fn toggle_today(&mut self, id: &HabitId) -> Result<HabitRecord, DomainError> {
        self.toggle_on(id, DateKey::today())
    }

    /// Toggle completion for the day the caller treats as today
    pub fn toggle_on(&mut self, id: &HabitId, today: DateKey) -> Result<HabitRecord, DomainError> {
        let index = self.position(id)?;
        let current = self.habits[index].clone();
        let updated = StreakEngine::toggle(current, today);
        self.habits[index] = updated.clone();
        Ok(updated)
    }

    /// Whether the habit is marked done for today
    pub fn is_completed_today(record: &HabitRecord) -> bool {
        Self::is_completed_on(record, &DateKey::today())
    }

    pub fn is_completed_on(record: &HabitRecord, day: &DateKey) -> bool {
        record.is_completed_on(day)
    }

    pub fn get(&self, id: &HabitId) -> Result<&HabitRecord, DomainError> {
        self.habits
            .iter()
            .find(|h| &h.id == id)
            .ok_or_else(|| not_found(id))
    }

    pub fn records(&self) -> &[HabitRecord] {
        &self.habits
    }

    pub fn iter(&self) -> impl Iterator<Item = &HabitRecord> {
        self.habits.iter()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    fn get_mut(&mut self, id: &HabitId) -> Result<&mut HabitRecord, DomainError> {
        self.habits
            .iter_mut()
            .find(|h| &h.id == id)
            .ok_or_else(|| not_found(id))
    }

    fn position(&self, id: &HabitId) -> Result<usize, DomainError> {
        self.habits
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &HabitId) -> DomainError {
    DomainError::NotFound {
        habit_id: id.to_string(),
    }
}
