//! On-disk record shapes for the JSON data file.
//!
//! These mirror the file layout and are deliberately loose (optional fields,
//! raw strings) so older files still parse. [`super::migrations`] turns them
//! into validated [`Task`]/[`Habit`] values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::{Habit, Task};
use crate::schedule::{self, Frequency};

/// Top-level layout: `{"tasks": [...], "habits": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub habits: Vec<HabitRecord>,
    /// Counters for the monotonic ID scheme. Absent in legacy files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_ids: Option<NextIds>,
}

/// Next identifier to hand out for each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NextIds {
    pub task: u64,
    pub habit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u64,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: u64,
    pub description: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub days: Vec<String>,
    /// Missing in files written before time-of-day support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completions: Vec<NaiveDate>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
            completed_at: task.completed_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<&Habit> for HabitRecord {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id,
            description: habit.description.clone(),
            frequency: habit.frequency,
            days: habit
                .days
                .iter()
                .map(|d| schedule::weekday_name(*d).to_string())
                .collect(),
            time_of_day: Some(habit.time_of_day.as_str().to_string()),
            created_at: habit.created_at,
            updated_at: habit.updated_at,
            completions: habit.completions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_written_by_older_versions() {
        let raw = r#"{
            "tasks": [
                {"id": 1, "description": "Buy groceries", "completed": false,
                 "created_at": "2024-05-01T09:15:00.123456"}
            ],
            "habits": [
                {"id": 1, "description": "Drink water", "frequency": "daily", "days": [],
                 "created_at": "2024-05-01T09:16:00.5", "completions": ["2024-05-01"]}
            ]
        }"#;
        let file: DataFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.tasks.len(), 1);
        assert_eq!(file.habits[0].time_of_day, None);
        assert!(file.next_ids.is_none());
        assert_eq!(
            file.habits[0].completions,
            vec![NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()]
        );
    }

    #[test]
    fn empty_object_is_an_empty_store() {
        let file: DataFile = serde_json::from_str("{}").unwrap();
        assert!(file.tasks.is_empty());
        assert!(file.habits.is_empty());
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let record = TaskRecord {
            id: 3,
            description: "Call mom".to_string(),
            completed: false,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            completed_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("completed_at").is_none());
        assert_eq!(json["created_at"], "2024-05-01T10:00:00");
    }
}
