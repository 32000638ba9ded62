/// Streak transition rules exercised through the public API
use habit_streak_mcp::*;

fn day(s: &str) -> DateKey {
    s.parse().expect("valid date")
}

fn record(dates: &[&str], streak: u32) -> HabitRecord {
    let mut habit = HabitRecord::new("Test Habit", Color::default(), None).unwrap();
    habit.completed_dates = dates.iter().map(|d| day(d)).collect();
    habit.last_completed = habit.latest_completion();
    habit.streak = streak;
    habit
}

#[test]
fn test_mark_from_empty() {
    let habit = StreakEngine::toggle(record(&[], 0), day("2024-07-01"));
    assert_eq!(habit.streak, 1);
    assert_eq!(habit.last_completed, Some(day("2024-07-01")));
}

#[test]
fn test_mark_extends_from_yesterday() {
    for n in [1u32, 2, 10, 365] {
        let habit = StreakEngine::toggle(record(&["2024-06-30"], n), day("2024-07-01"));
        assert_eq!(habit.streak, n + 1);
    }
}

#[test]
fn test_mark_after_broken_chain() {
    for n in [1u32, 4, 50] {
        let habit = StreakEngine::toggle(record(&["2024-06-29"], n), day("2024-07-01"));
        assert_eq!(habit.streak, 1);
    }
}

#[test]
fn test_unmark_decrements() {
    for n in [0u32, 1, 2, 9] {
        let habit = StreakEngine::toggle(record(&["2024-06-30", "2024-07-01"], n), day("2024-07-01"));
        assert_eq!(habit.streak, n.saturating_sub(1));
        assert_eq!(habit.last_completed, Some(day("2024-06-30")));
    }
}

#[test]
fn test_month_boundary_counts_as_consecutive() {
    let habit = StreakEngine::toggle(record(&["2024-02-29"], 3), day("2024-03-01"));
    assert_eq!(habit.streak, 4);

    let habit = StreakEngine::toggle(record(&["2023-02-28"], 3), day("2023-03-01"));
    assert_eq!(habit.streak, 4);
}

#[test]
fn test_four_day_scenario() {
    let mut habits = HabitCollection::new();
    let id = habits.create("Water", Color::default(), None).unwrap().id;

    habits.toggle_on(&id, day("2024-07-01")).unwrap();
    let after_day2 = habits.toggle_on(&id, day("2024-07-02")).unwrap();
    assert_eq!(after_day2.streak, 2);

    // Day 3 skipped
    let after_day4 = habits.toggle_on(&id, day("2024-07-04")).unwrap();
    assert_eq!(after_day4.streak, 1);
    let dates: Vec<String> = after_day4.completed_dates.iter().map(|d| d.to_string()).collect();
    assert_eq!(dates, vec!["2024-07-01", "2024-07-02", "2024-07-04"]);
}

#[test]
fn test_completion_lookup_by_day() {
    let mut habits = HabitCollection::new();
    let id = habits.create("Water", Color::default(), None).unwrap().id;

    let habit = habits.toggle_on(&id, day("2024-07-01")).unwrap();
    assert!(HabitCollection::is_completed_on(&habit, &day("2024-07-01")));
    assert!(!HabitCollection::is_completed_on(&habit, &day("2024-07-02")));
}
