//! JSON file store for tasks and habits.
//!
//! The whole file is read on open and rewritten after every mutation; the
//! last write wins. Callers pass the current local time explicitly so that
//! timestamps and "today" are deterministic in tests.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use super::config::{Config, IdStrategy};
use super::migrations;
use super::record::{DataFile, HabitRecord, NextIds, TaskRecord};
use crate::agenda::{AgendaSource, Snapshot};
use crate::completion::{self, CompletionOutcome};
use crate::error::{Result, StoreError, ValidationError};
use crate::model::{validate_description, Habit, HabitId, HabitSpec, HabitUpdate, Task, TaskId};
use crate::schedule::Frequency;

/// Which record kind `done <id>` resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletedItem {
    Task(CompletionOutcome),
    Habit(CompletionOutcome),
}

pub struct TodoStore {
    path: PathBuf,
    id_strategy: IdStrategy,
    tasks: Vec<Task>,
    habits: Vec<Habit>,
    next_ids: NextIds,
}

/// In-memory records as they were before a mutation.
struct Checkpoint {
    tasks: Vec<Task>,
    habits: Vec<Habit>,
    next_ids: NextIds,
}

impl TodoStore {
    /// Open the store described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.data_file()?;
        Ok(Self::open_at(path, config.storage.id_strategy)?)
    }

    /// Open (or start) a store at an explicit path.
    ///
    /// A missing file is an empty store. A file that exists but cannot be
    /// parsed is an error, so a later save never clobbers it.
    pub fn open_at(path: impl Into<PathBuf>, id_strategy: IdStrategy) -> Result<Self, StoreError> {
        let path = path.into();
        let file = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<DataFile>(&content).map_err(|source| {
                tracing::warn!("Data file {} is malformed: {}", path.display(), source);
                StoreError::Parse {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", path.display());
                DataFile::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let stored_ids = file.next_ids;
        let normalized = migrations::normalize(file.tasks, file.habits);
        let needs_save = normalized.needs_save();

        let mut store = Self {
            path,
            id_strategy,
            tasks: normalized.tasks,
            habits: normalized.habits,
            next_ids: stored_ids.unwrap_or_default(),
        };
        store.reconcile_next_ids()?;

        tracing::debug!(
            "Loaded {} task(s) and {} habit(s) from {}",
            store.tasks.len(),
            store.habits.len(),
            store.path.display()
        );

        if needs_save {
            store.save()?;
        }
        Ok(store)
    }

    /// Make sure counters are ahead of every stored ID.
    fn reconcile_next_ids(&mut self) -> Result<(), StoreError> {
        let max_task = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let max_habit = self.habits.iter().map(|h| h.id).max().unwrap_or(0);
        self.next_ids.task = self.next_ids.task.max(successor("task", max_task)?);
        self.next_ids.habit = self.next_ids.habit.max(successor("habit", max_habit)?);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    /// Write every record back to the data file.
    pub fn save(&self) -> Result<(), StoreError> {
        let file = DataFile {
            tasks: self.tasks.iter().map(TaskRecord::from).collect(),
            habits: self.habits.iter().map(HabitRecord::from).collect(),
            next_ids: match self.id_strategy {
                IdStrategy::Monotonic => Some(self.next_ids),
                IdStrategy::Count => None,
            },
        };
        let content = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Saved data file {}", self.path.display());
        Ok(())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            tasks: self.tasks.clone(),
            habits: self.habits.clone(),
            next_ids: self.next_ids,
        }
    }

    /// Save a mutation, or put the records back as they were if the write
    /// fails. An error always leaves memory matching the file.
    fn commit(&mut self, checkpoint: Checkpoint) -> Result<(), StoreError> {
        if let Err(e) = self.save() {
            tracing::warn!("Discarding unsaved change: {}", e);
            self.tasks = checkpoint.tasks;
            self.habits = checkpoint.habits;
            self.next_ids = checkpoint.next_ids;
            return Err(e);
        }
        Ok(())
    }

    /// Immutable copy of the current records.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.clone(),
            habits: self.habits.clone(),
        }
    }

    fn next_task_id(&mut self) -> Result<TaskId, StoreError> {
        match self.id_strategy {
            IdStrategy::Count => successor("task", self.tasks.len() as u64),
            IdStrategy::Monotonic => {
                let id = self.next_ids.task;
                self.next_ids.task = successor("task", id)?;
                Ok(id)
            }
        }
    }

    fn next_habit_id(&mut self) -> Result<HabitId, StoreError> {
        match self.id_strategy {
            IdStrategy::Count => successor("habit", self.habits.len() as u64),
            IdStrategy::Monotonic => {
                let id = self.next_ids.habit;
                self.next_ids.habit = successor("habit", id)?;
                Ok(id)
            }
        }
    }

    pub fn add_task(&mut self, description: &str, now: NaiveDateTime) -> Result<TaskId> {
        let description = validate_description(description)?;
        let checkpoint = self.checkpoint();
        let id = self.next_task_id()?;
        self.tasks.push(Task {
            id,
            description,
            completed: false,
            created_at: now,
            completed_at: None,
            updated_at: None,
        });
        self.commit(checkpoint)?;
        tracing::info!("Added task {}", id);
        Ok(id)
    }

    pub fn add_habit(
        &mut self,
        spec: HabitSpec,
        now: NaiveDateTime,
    ) -> Result<HabitId, StoreError> {
        let checkpoint = self.checkpoint();
        let id = self.next_habit_id()?;
        let days = if spec.frequency == Frequency::Weekly {
            spec.days
        } else {
            Vec::new()
        };
        self.habits.push(Habit {
            id,
            description: spec.description,
            frequency: spec.frequency,
            days,
            time_of_day: spec.time_of_day,
            created_at: now,
            updated_at: None,
            completions: Vec::new(),
        });
        self.commit(checkpoint)?;
        tracing::info!("Added {} habit {}", spec.frequency, id);
        Ok(id)
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Tasks in store order, optionally including completed ones.
    pub fn tasks(&self, show_completed: bool) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| show_completed || !t.completed)
            .collect()
    }

    /// Mark a task completed. Completing twice keeps the first timestamp.
    pub fn complete_task(
        &mut self,
        id: TaskId,
        now: NaiveDateTime,
    ) -> Result<CompletionOutcome, StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        if self.tasks[index].completed {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        let checkpoint = self.checkpoint();
        let task = &mut self.tasks[index];
        task.completed = true;
        task.completed_at = Some(now);
        self.commit(checkpoint)?;
        tracing::info!("Completed task {}", id);
        Ok(CompletionOutcome::Recorded)
    }

    /// Check a habit off for the date of `now`.
    pub fn complete_habit_today(
        &mut self,
        id: HabitId,
        now: NaiveDateTime,
    ) -> Result<CompletionOutcome, StoreError> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or(StoreError::HabitNotFound(id))?;

        let checkpoint = self.checkpoint();
        let completions = &mut self.habits[index].completions;
        let outcome = completion::record_completion(completions, now.date());
        if outcome.is_recorded() {
            self.commit(checkpoint)?;
            tracing::info!("Checked off habit {} for {}", id, now.date());
        } else {
            tracing::debug!("Habit {} already completed on {}", id, now.date());
        }
        Ok(outcome)
    }

    /// Complete by bare ID: tasks are tried first, then habits.
    pub fn complete_any(
        &mut self,
        id: u64,
        now: NaiveDateTime,
    ) -> Result<CompletedItem, StoreError> {
        if self.get_task(id).is_some() {
            return self.complete_task(id, now).map(CompletedItem::Task);
        }
        match self.complete_habit_today(id, now) {
            Ok(outcome) => Ok(CompletedItem::Habit(outcome)),
            Err(StoreError::HabitNotFound(_)) => Err(StoreError::TaskNotFound(id)),
            Err(e) => Err(e),
        }
    }

    pub fn update_task(&mut self, id: TaskId, description: &str, now: NaiveDateTime) -> Result<()> {
        let description = validate_description(description)?;
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;

        let checkpoint = self.checkpoint();
        let task = &mut self.tasks[index];
        task.description = description;
        task.updated_at = Some(now);
        self.commit(checkpoint)?;
        tracing::info!("Updated task {}", id);
        Ok(())
    }

    /// Apply a partial update. Switching to daily clears the day list.
    pub fn update_habit(
        &mut self,
        id: HabitId,
        update: HabitUpdate,
        now: NaiveDateTime,
    ) -> Result<()> {
        let description = update
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?;

        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or(StoreError::HabitNotFound(id))?;

        let frequency = update.frequency.unwrap_or(self.habits[index].frequency);
        if let Some(days) = &update.days {
            if frequency != Frequency::Weekly {
                return Err(StoreError::DaysOnNonWeekly {
                    id,
                    frequency: frequency.to_string(),
                }
                .into());
            }
            if days.is_empty() {
                return Err(ValidationError::MissingDays.into());
            }
        }

        let checkpoint = self.checkpoint();
        let habit = &mut self.habits[index];
        if let Some(description) = description {
            habit.description = description;
        }
        habit.frequency = frequency;
        if let Some(days) = update.days {
            habit.days = days;
        }
        if frequency == Frequency::Daily {
            habit.days.clear();
        }
        if let Some(time_of_day) = update.time_of_day {
            habit.time_of_day = time_of_day;
        }
        habit.updated_at = Some(now);

        self.commit(checkpoint)?;
        tracing::info!("Updated habit {}", id);
        Ok(())
    }

    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        let checkpoint = self.checkpoint();
        let task = self.tasks.remove(index);
        self.commit(checkpoint)?;
        tracing::info!("Removed task {}", id);
        Ok(task)
    }

    pub fn remove_habit(&mut self, id: HabitId) -> Result<Habit, StoreError> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or(StoreError::HabitNotFound(id))?;
        let checkpoint = self.checkpoint();
        let habit = self.habits.remove(index);
        self.commit(checkpoint)?;
        tracing::info!("Removed habit {}", id);
        Ok(habit)
    }
}

fn successor(kind: &'static str, last: u64) -> Result<u64, StoreError> {
    last.checked_add(1).ok_or(StoreError::IdOverflow { kind, last })
}

impl AgendaSource for TodoStore {
    fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn list_habits(&self) -> &[Habit] {
        &self.habits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::time_of_day::TimeOfDay;
    use chrono::{NaiveDate, Weekday};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn temp_store(strategy: IdStrategy) -> (tempfile::TempDir, TodoStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TodoStore::open_at(dir.path().join("todo_data.json"), strategy).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (_dir, store) = temp_store(IdStrategy::Monotonic);
        assert!(store.list_tasks().is_empty());
        assert!(store.list_habits().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn count_strategy_can_reuse_live_ids() {
        let (_dir, mut store) = temp_store(IdStrategy::Count);
        assert_eq!(store.add_task("a", now()).unwrap(), 1);
        assert_eq!(store.add_task("b", now()).unwrap(), 2);
        store.remove_task(1).unwrap();
        assert_eq!(store.add_task("c", now()).unwrap(), 2);
        assert_eq!(store.tasks(true).iter().filter(|t| t.id == 2).count(), 2);
    }

    #[test]
    fn monotonic_strategy_never_reuses_ids() {
        let (dir, mut store) = temp_store(IdStrategy::Monotonic);
        store.add_task("a", now()).unwrap();
        store.add_task("b", now()).unwrap();
        store.remove_task(2).unwrap();
        assert_eq!(store.add_task("c", now()).unwrap(), 3);

        store.remove_task(3).unwrap();
        drop(store);

        let mut reopened =
            TodoStore::open_at(dir.path().join("todo_data.json"), IdStrategy::Monotonic).unwrap();
        assert_eq!(reopened.add_task("d", now()).unwrap(), 4);
    }

    #[test]
    fn task_and_habit_ids_are_independent() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        let task_id = store.add_task("Buy milk", now()).unwrap();
        let spec = HabitSpec::daily("Drink water", TimeOfDay::Anytime).unwrap();
        let habit_id = store.add_habit(spec, now()).unwrap();
        assert_eq!((task_id, habit_id), (1, 1));
    }

    #[test]
    fn add_task_rejects_empty_description() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        assert!(matches!(
            store.add_task("   ", now()),
            Err(CoreError::Validation(ValidationError::EmptyDescription))
        ));
        assert!(store.list_tasks().is_empty());
    }

    #[test]
    fn complete_task_distinguishes_outcomes() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        let id = store.add_task("Pay rent", now()).unwrap();

        assert_eq!(store.complete_task(id, now()).unwrap(), CompletionOutcome::Recorded);
        let later = now() + chrono::Duration::hours(1);
        assert_eq!(
            store.complete_task(id, later).unwrap(),
            CompletionOutcome::AlreadyCompleted
        );
        assert_eq!(store.get_task(id).unwrap().completed_at, Some(now()));
        assert!(matches!(store.complete_task(99, now()), Err(StoreError::TaskNotFound(99))));
    }

    #[test]
    fn complete_habit_today_is_idempotent() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        let spec = HabitSpec::daily("Meditate", TimeOfDay::Morning).unwrap();
        let id = store.add_habit(spec, now()).unwrap();

        assert!(store.complete_habit_today(id, now()).unwrap().is_recorded());
        assert_eq!(
            store.complete_habit_today(id, now()).unwrap(),
            CompletionOutcome::AlreadyCompleted
        );
        assert_eq!(store.get_habit(id).unwrap().completions, vec![now().date()]);
        assert!(matches!(
            store.complete_habit_today(42, now()),
            Err(StoreError::HabitNotFound(42))
        ));
    }

    #[test]
    fn complete_any_prefers_tasks() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        store.add_task("Task one", now()).unwrap();
        let spec = HabitSpec::daily("Habit one", TimeOfDay::Anytime).unwrap();
        store.add_habit(spec.clone(), now()).unwrap();
        store.add_habit(spec, now()).unwrap();

        assert_eq!(
            store.complete_any(1, now()).unwrap(),
            CompletedItem::Task(CompletionOutcome::Recorded)
        );
        assert_eq!(
            store.complete_any(2, now()).unwrap(),
            CompletedItem::Habit(CompletionOutcome::Recorded)
        );
        assert!(store.complete_any(7, now()).is_err());
    }

    #[test]
    fn update_habit_to_daily_clears_days() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        let days = vec![Weekday::Mon, Weekday::Fri];
        let spec = HabitSpec::weekly("Gym", days, TimeOfDay::Afternoon).unwrap();
        let id = store.add_habit(spec, now()).unwrap();

        let update = HabitUpdate {
            frequency: Some(Frequency::Daily),
            ..HabitUpdate::default()
        };
        store.update_habit(id, update, now()).unwrap();

        let habit = store.get_habit(id).unwrap();
        assert_eq!(habit.frequency, Frequency::Daily);
        assert!(habit.days.is_empty());
        assert_eq!(habit.updated_at, Some(now()));
    }

    #[test]
    fn update_habit_rejects_days_on_daily() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        let spec = HabitSpec::daily("Journal", TimeOfDay::Evening).unwrap();
        let id = store.add_habit(spec, now()).unwrap();

        let update = HabitUpdate {
            days: Some(vec![Weekday::Tue]),
            ..HabitUpdate::default()
        };
        assert!(matches!(
            store.update_habit(id, update, now()),
            Err(CoreError::Store(StoreError::DaysOnNonWeekly { .. }))
        ));
        assert!(store.get_habit(id).unwrap().updated_at.is_none());
    }

    #[test]
    fn update_task_sets_timestamp() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        let id = store.add_task("Buy milk", now()).unwrap();
        store.update_task(id, "Buy milk and bread", now()).unwrap();
        let task = store.get_task(id).unwrap();
        assert_eq!(task.description, "Buy milk and bread");
        assert_eq!(task.updated_at, Some(now()));
        assert!(store.update_task(5, "x", now()).is_err());
    }

    #[test]
    fn remove_reports_not_found() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        assert!(matches!(store.remove_task(1), Err(StoreError::TaskNotFound(1))));
        assert!(matches!(store.remove_habit(1), Err(StoreError::HabitNotFound(1))));
    }

    #[test]
    fn malformed_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo_data.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            TodoStore::open_at(&path, IdStrategy::Monotonic),
            Err(StoreError::Parse { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    /// Put a directory where the data file goes so every write fails.
    fn block_writes(store: &TodoStore) {
        if store.path().exists() {
            std::fs::remove_file(store.path()).unwrap();
        }
        std::fs::create_dir(store.path()).unwrap();
    }

    #[test]
    fn failed_save_leaves_records_unchanged() {
        let (_dir, mut store) = temp_store(IdStrategy::Monotonic);
        let task_id = store.add_task("Pay rent", now()).unwrap();
        let spec = HabitSpec::daily("Stretch", TimeOfDay::Anytime).unwrap();
        let habit_id = store.add_habit(spec.clone(), now()).unwrap();
        block_writes(&store);

        assert!(matches!(
            store.complete_habit_today(habit_id, now()),
            Err(StoreError::Io { .. })
        ));
        assert!(store.get_habit(habit_id).unwrap().completions.is_empty());
        assert_eq!(crate::agenda::full_agenda(&store, now()).len(), 2);

        assert!(store.add_task("Never saved", now()).is_err());
        assert!(store.add_habit(spec, now()).is_err());
        assert!(store.complete_task(task_id, now()).is_err());
        assert!(store.update_task(task_id, "Renamed", now()).is_err());
        let update = HabitUpdate {
            time_of_day: Some(TimeOfDay::Evening),
            ..HabitUpdate::default()
        };
        assert!(store.update_habit(habit_id, update, now()).is_err());
        assert!(store.remove_task(task_id).is_err());
        assert!(store.remove_habit(habit_id).is_err());

        let task = store.get_task(task_id).unwrap();
        assert_eq!(task.description, "Pay rent");
        assert!(!task.completed);
        assert_eq!(store.tasks(true).len(), 1);
        let habit = store.get_habit(habit_id).unwrap();
        assert_eq!(habit.time_of_day, TimeOfDay::Anytime);
        assert!(habit.updated_at.is_none());
        assert_eq!(store.list_habits().len(), 1);

        std::fs::remove_dir(store.path()).unwrap();
        assert_eq!(store.add_task("Saved", now()).unwrap(), task_id + 1);
    }

    #[test]
    fn largest_stored_id_cannot_be_followed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo_data.json");
        let content = format!(
            r#"{{"tasks": [{{"id": {}, "description": "Last one"}}], "habits": []}}"#,
            u64::MAX
        );
        std::fs::write(&path, &content).unwrap();

        assert!(matches!(
            TodoStore::open_at(&path, IdStrategy::Monotonic),
            Err(StoreError::IdOverflow { kind: "task", last: u64::MAX })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn exhausted_counter_refuses_new_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo_data.json");
        let content = format!(
            r#"{{"tasks": [], "habits": [], "next_ids": {{"task": {}, "habit": 1}}}}"#,
            u64::MAX
        );
        std::fs::write(&path, content).unwrap();

        let mut store = TodoStore::open_at(&path, IdStrategy::Monotonic).unwrap();
        assert!(matches!(
            store.add_task("One too many", now()),
            Err(CoreError::Store(StoreError::IdOverflow { kind: "task", .. }))
        ));
        assert!(store.list_tasks().is_empty());

        let spec = HabitSpec::daily("Still fine", TimeOfDay::Anytime).unwrap();
        assert_eq!(store.add_habit(spec, now()).unwrap(), 1);
    }
}
