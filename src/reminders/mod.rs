/// Daily reminder checks
///
/// The decision of whether a habit's reminder is due is a pure predicate.
/// `ReminderScheduler` polls that predicate on a timer and hands due
/// reminders to a `Notifier`, which owns delivery.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{DateKey, HabitCollection, HabitId, HabitRecord, ReminderTime};
use crate::HabitTrackerServer;

/// Default time between reminder checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Whether a habit's reminder should fire at `now` on `today`
///
/// True when the reminder time equals `now` and the habit is not yet done
/// for `today`. Calling it repeatedly with the same inputs gives the same
/// answer.
pub fn should_notify(habit: &HabitRecord, now: ReminderTime, today: &DateKey) -> bool {
    habit.reminder == Some(now) && !HabitCollection::is_completed_on(habit, today)
}

/// Habits whose reminders are due, in collection order
pub fn due_reminders<'a>(
    habits: &'a HabitCollection,
    now: ReminderTime,
    today: &DateKey,
) -> Vec<&'a HabitRecord> {
    habits
        .iter()
        .filter(|habit| should_notify(habit, now, today))
        .collect()
}

/// A reminder ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub habit_id: HabitId,
    pub title: String,
    pub body: String,
}

impl Reminder {
    pub fn for_habit(habit: &HabitRecord) -> Self {
        Self {
            habit_id: habit.id.clone(),
            title: "Habit Reminder".to_string(),
            body: format!("Time to complete: {}", habit.name),
        }
    }
}

/// Errors a notifier can report
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Delivers reminders to the user
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError>;
}

/// Notifier that writes reminders to the log
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        info!("🔔 {}: {}", reminder.title, reminder.body);
        Ok(())
    }
}

/// Periodic reminder poller
///
/// Each firing is keyed by (habit, day, minute) so a poll period shorter
/// than a minute never delivers the same reminder twice.
pub struct ReminderScheduler {
    server: Arc<Mutex<HabitTrackerServer>>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    fired: HashSet<(HabitId, DateKey, ReminderTime)>,
}

impl ReminderScheduler {
    pub fn new(
        server: Arc<Mutex<HabitTrackerServer>>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
    ) -> Self {
        Self {
            server,
            notifier,
            interval,
            fired: HashSet::new(),
        }
    }

    /// Run the poll loop on the tokio runtime until the handle is aborted
    pub fn spawn(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Reminder scheduler started (checking every {:?})", self.interval);
            let mut ticker = tokio::time::interval(self.interval);

            loop {
                ticker.tick().await;
                let fired = self.check_at(Local::now().naive_local()).await;
                if fired > 0 {
                    debug!("Delivered {} reminder(s)", fired);
                }
            }
        })
    }

    /// Check and deliver reminders for a wall-clock instant
    ///
    /// Returns how many reminders were delivered successfully.
    pub async fn check_at(&mut self, at: NaiveDateTime) -> usize {
        let today = DateKey::new(at.date());
        let now = ReminderTime::from_time(at.time());

        // Hold the lock only long enough to pick the due habits
        let due: Vec<Reminder> = {
            let server = self.server.lock().await;
            due_reminders(server.habits(), now, &today)
                .into_iter()
                .map(Reminder::for_habit)
                .collect()
        };

        // Keys from earlier days can never match again
        self.fired.retain(|(_, day, _)| *day == today);

        let mut delivered = 0;
        for reminder in due {
            let key = (reminder.habit_id.clone(), today, now);
            if self.fired.contains(&key) {
                continue;
            }

            match self.notifier.notify(&reminder).await {
                Ok(()) => {
                    self.fired.insert(key);
                    delivered += 1;
                }
                Err(e) => warn!("Failed to deliver reminder for habit {}: {}", reminder.habit_id, e),
            }
        }

        delivered
    }
}
