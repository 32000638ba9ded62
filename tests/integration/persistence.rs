/// Server operations persisted through both storage backends
use habit_streak_mcp::*;
use tempfile::tempdir;

fn day(s: &str) -> DateKey {
    s.parse().expect("valid date")
}

fn sqlite_server(path: &std::path::Path) -> HabitTrackerServer {
    HabitTrackerServer::new(Box::new(SqliteStorage::new(path).unwrap())).unwrap()
}

fn json_server(path: &std::path::Path) -> HabitTrackerServer {
    HabitTrackerServer::new(Box::new(JsonFileStorage::new(path).unwrap())).unwrap()
}

fn exercise(server: &mut HabitTrackerServer) -> HabitId {
    let reminder = ReminderTime::new(7, 30).unwrap();
    let water = server
        .create_habit("Drink water", Color::new("#3b82f6").unwrap(), Some(reminder))
        .unwrap();
    let read = server.create_habit("Read", Color::default(), None).unwrap();

    server.toggle_habit_on(&water.id, day("2024-07-01")).unwrap();
    server.toggle_habit_on(&water.id, day("2024-07-02")).unwrap();
    server.toggle_habit_on(&water.id, day("2024-07-04")).unwrap();
    server.toggle_habit_on(&read.id, day("2024-07-04")).unwrap();
    server.delete_habit(&read.id).unwrap();

    water.id
}

fn assert_reloaded(server: &HabitTrackerServer, id: &HabitId) {
    assert_eq!(server.habits().len(), 1);

    let habit = server.habits().get(id).unwrap();
    assert_eq!(habit.name, "Drink water");
    assert_eq!(habit.color.as_str(), "#3b82f6");
    assert_eq!(habit.reminder, ReminderTime::new(7, 30).ok());
    assert_eq!(habit.streak, 1);
    assert_eq!(habit.last_completed, Some(day("2024-07-04")));
    assert_eq!(habit.total_completions(), 3);
}

#[tokio::test]
async fn test_sqlite_state_survives_restart() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("habits.db");

    let id = {
        let mut server = sqlite_server(&db_path);
        exercise(&mut server)
    };

    let reopened = sqlite_server(&db_path);
    assert_reloaded(&reopened, &id);
}

#[tokio::test]
async fn test_json_state_survives_restart() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("data").join("habits.json");

    let id = {
        let mut server = json_server(&file_path);
        exercise(&mut server)
    };

    let reopened = json_server(&file_path);
    assert_reloaded(&reopened, &id);
}

#[tokio::test]
async fn test_creation_order_is_preserved() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("habits.db");

    {
        let mut server = sqlite_server(&db_path);
        for name in ["Zebra", "Apple", "Mango"] {
            server.create_habit(name, Color::default(), None).unwrap();
        }
    }

    let reopened = sqlite_server(&db_path);
    let names: Vec<&str> = reopened.habits().iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
}

#[tokio::test]
async fn test_failed_operation_leaves_storage_untouched() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("habits.json");

    let mut server = json_server(&file_path);
    let habit = server.create_habit("Stretch", Color::default(), None).unwrap();
    let before = std::fs::read_to_string(&file_path).unwrap();

    assert!(server.create_habit("   ", Color::default(), None).is_err());
    assert!(server.toggle_habit_on(&HabitId::new(), day("2024-07-01")).is_err());
    assert!(server.delete_habit(&HabitId::new()).is_err());

    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), before);
    assert_eq!(server.habits().get(&habit.id).unwrap().streak, 0);
}

#[tokio::test]
async fn test_json_document_is_readable_by_hand() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("habits.json");

    let mut server = json_server(&file_path);
    let habit = server.create_habit("Journal", Color::default(), None).unwrap();
    server.toggle_habit_on(&habit.id, day("2024-01-31")).unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file_path).unwrap()).unwrap();
    let stored = &document[0];
    assert_eq!(stored["name"], "Journal");
    assert_eq!(stored["lastCompleted"], "2024-01-31");
    assert_eq!(stored["completedDates"], serde_json::json!(["2024-01-31"]));
    assert_eq!(stored["streak"], 1);
}

fn stored_habit(id: &str, name: &str, streak: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "color": "#10b981",
        "streak": streak,
        "lastCompleted": null,
        "completedDates": [],
        "reminder": null,
        "createdAt": "2024-06-01T08:00:00Z"
    })
}

#[tokio::test]
async fn test_json_blank_name_fails_to_load() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("habits.json");
    let document = serde_json::json!([stored_habit("a1", "Read", 0), stored_habit("b2", "  ", 0)]);
    std::fs::write(&file_path, document.to_string()).unwrap();

    let result = HabitTrackerServer::new(Box::new(JsonFileStorage::new(&file_path).unwrap()));
    assert!(matches!(result, Err(ServerError::Domain(DomainError::Validation(_)))));
}

#[tokio::test]
async fn test_json_blank_id_fails_to_load() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("habits.json");
    let document = serde_json::json!([stored_habit("", "Read", 5)]);
    std::fs::write(&file_path, document.to_string()).unwrap();

    let result = HabitTrackerServer::new(Box::new(JsonFileStorage::new(&file_path).unwrap()));
    assert!(matches!(result, Err(ServerError::Storage(StorageError::Serialization(_)))));
}

#[tokio::test]
async fn test_json_padded_id_is_usable_after_load() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("habits.json");
    let document = serde_json::json!([stored_habit(" padded ", "Read", 5)]);
    std::fs::write(&file_path, document.to_string()).unwrap();

    let mut server = json_server(&file_path);
    let id = HabitId::from_string("padded").unwrap();
    assert_eq!(server.habits().get(&id).unwrap().streak, 0);

    let habit = server.toggle_habit_on(&id, day("2024-07-01")).unwrap();
    assert_eq!(habit.streak, 1);
    server.delete_habit(&id).unwrap();
    assert!(server.habits().is_empty());
}
