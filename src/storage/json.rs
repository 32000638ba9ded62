/// JSON file implementation of the habit storage interface
///
/// The whole collection lives in one file as a JSON array of habit records,
/// the same shape the browser version kept in local storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::HabitRecord;
use crate::storage::{HabitStorage, StorageError};

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Use the given file, creating its parent directory if needed
    ///
    /// The file itself is only created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        tracing::info!("JSON storage initialized at: {:?}", path);
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "habits.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HabitStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<HabitRecord>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No habit file at {:?} yet, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let habits: Vec<HabitRecord> = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded {} habits from {:?}", habits.len(), self.path);
        Ok(habits)
    }

    /// Write to a sibling temp file, then rename over the real one
    fn save(&self, habits: &[HabitRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(habits)?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved {} habits to {:?}", habits.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Color, DateKey, ReminderTime};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("nested").join("habits.json")).unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("habits.json")).unwrap();

        let mut habit = HabitRecord::new("Journal", Color::default(), ReminderTime::new(22, 0).ok()).unwrap();
        habit.completed_dates.insert("2024-04-01".parse().unwrap());
        habit.last_completed = habit.latest_completion();
        habit.streak = 1;

        storage.save(&[habit.clone()]).unwrap();
        assert!(!storage.temp_path().exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, vec![habit]);
    }

    #[test]
    fn test_reads_browser_document() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("habits.json");
        fs::write(
            &path,
            r##"[{
                "id": "1717171717171",
                "name": "Drink water",
                "color": "#10b981",
                "streak": 2,
                "lastCompleted": "2024-06-02",
                "completedDates": ["2024-06-02", "2024-06-01", "2024-06-01"],
                "reminder": "09:00",
                "createdAt": "2024-06-01T08:00:00.000Z"
            }]"##,
        )
        .unwrap();

        let loaded = JsonFileStorage::new(&path).unwrap().load().unwrap();
        assert_eq!(loaded.len(), 1);

        let habit = &loaded[0];
        assert_eq!(habit.id.as_str(), "1717171717171");
        assert_eq!(habit.reminder, Some(ReminderTime::new(9, 0).unwrap()));
        let dates: Vec<DateKey> = habit.completed_dates.iter().copied().collect();
        assert_eq!(dates, vec!["2024-06-01".parse().unwrap(), "2024-06-02".parse().unwrap()]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("habits.json");
        fs::write(&path, "{not json").unwrap();

        let result = JsonFileStorage::new(&path).unwrap().load();
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_blank_id_or_color_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("habits.json");

        for (id, color) in [("", "#10b981"), ("  ", "#10b981"), ("1", "")] {
            let document = serde_json::json!([{
                "id": id,
                "name": "Drink water",
                "color": color,
                "streak": 0,
                "lastCompleted": null,
                "completedDates": [],
                "reminder": null,
                "createdAt": "2024-06-01T08:00:00Z"
            }]);
            fs::write(&path, document.to_string()).unwrap();

            let result = JsonFileStorage::new(&path).unwrap().load();
            assert!(matches!(result, Err(StorageError::Serialization(_))), "loaded id={:?} color={:?}", id, color);
        }
    }
}
