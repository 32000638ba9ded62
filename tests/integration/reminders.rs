/// Reminder scheduling against a live server
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use habit_streak_mcp::*;
use tokio::sync::Mutex;

#[derive(Default)]
struct CollectingNotifier {
    seen: std::sync::Mutex<Vec<Reminder>>,
}

#[async_trait]
impl Notifier for CollectingNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        self.seen.lock().unwrap().push(reminder.clone());
        Ok(())
    }
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[tokio::test]
async fn test_reminder_fires_until_habit_is_done() {
    let mut server = HabitTrackerServer::new(Box::new(SqliteStorage::open_in_memory().unwrap())).unwrap();
    let habit = server
        .create_habit("Meditate", Color::default(), ReminderTime::new(8, 0).ok())
        .unwrap();
    server.create_habit("No reminder", Color::default(), None).unwrap();

    let shared = Arc::new(Mutex::new(server));
    let notifier = Arc::new(CollectingNotifier::default());
    let mut scheduler = ReminderScheduler::new(shared.clone(), notifier.clone(), Duration::from_secs(60));

    assert_eq!(scheduler.check_at(at("2024-07-01 07:59:00")).await, 0);
    assert_eq!(scheduler.check_at(at("2024-07-01 08:00:05")).await, 1);
    // Same minute, already delivered
    assert_eq!(scheduler.check_at(at("2024-07-01 08:00:40")).await, 0);

    {
        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].habit_id, habit.id);
        assert_eq!(seen[0].body, "Time to complete: Meditate");
    }

    // Completed the next day before the reminder minute
    let next_day: DateKey = "2024-07-02".parse().unwrap();
    shared.lock().await.toggle_habit_on(&habit.id, next_day).unwrap();
    assert_eq!(scheduler.check_at(at("2024-07-02 08:00:00")).await, 0);
    assert_eq!(notifier.seen.lock().unwrap().len(), 1);
}
