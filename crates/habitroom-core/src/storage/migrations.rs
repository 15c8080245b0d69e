//! Load-time normalization of data file records.
//!
//! Every habit passes through [`normalize_habit`] exactly once per load:
//!
//! - a missing `time_of_day` becomes `anytime` (this counts as a migration and
//!   causes the file to be rewritten),
//! - day names are canonicalized and deduplicated,
//! - daily habits lose any stray day list,
//! - repeated completion dates are collapsed.

use crate::completion;
use crate::model::{Habit, Task};
use crate::schedule::{self, Frequency};
use crate::time_of_day::TimeOfDay;

use super::record::{HabitRecord, TaskRecord};

/// Normalized records plus whether anything needs writing back.
#[derive(Debug, Default)]
pub struct Normalized {
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    /// Number of habits that had no `time_of_day`.
    pub migrated: usize,
}

impl Normalized {
    pub fn needs_save(&self) -> bool {
        self.migrated > 0
    }
}

pub fn normalize(tasks: Vec<TaskRecord>, habits: Vec<HabitRecord>) -> Normalized {
    let mut out = Normalized {
        tasks: tasks.into_iter().map(normalize_task).collect(),
        ..Normalized::default()
    };

    for record in habits {
        let (habit, migrated) = normalize_habit(record);
        if migrated {
            out.migrated += 1;
        }
        out.habits.push(habit);
    }

    if out.migrated > 0 {
        tracing::info!("Migrated {} habit(s) without time_of_day to anytime", out.migrated);
    }
    out
}

pub fn normalize_task(record: TaskRecord) -> Task {
    Task {
        id: record.id,
        description: record.description,
        completed: record.completed,
        created_at: record.created_at,
        completed_at: record.completed_at,
        updated_at: record.updated_at,
    }
}

/// Returns the habit and whether its `time_of_day` had to be filled in.
pub fn normalize_habit(record: HabitRecord) -> (Habit, bool) {
    let migrated = record.time_of_day.is_none();
    let time_of_day = match record.time_of_day.as_deref() {
        None => TimeOfDay::Anytime,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Habit {} has unknown time_of_day '{}', treating as anytime",
                record.id,
                raw
            );
            TimeOfDay::Anytime
        }),
    };

    let mut days = Vec::with_capacity(record.days.len());
    for name in &record.days {
        match schedule::parse_weekday(name) {
            Some(day) if !days.contains(&day) => days.push(day),
            Some(_) => {}
            None => tracing::warn!("Habit {} has unknown day '{}', ignoring it", record.id, name),
        }
    }
    if record.frequency == Frequency::Daily && !days.is_empty() {
        tracing::debug!("Habit {} is daily, clearing its day list", record.id);
        days.clear();
    }
    if record.frequency == Frequency::Unknown {
        tracing::warn!("Habit {} has an unknown frequency and will never be due", record.id);
    }

    let mut completions = record.completions;
    let dropped = completion::dedup_in_place(&mut completions);
    if dropped > 0 {
        tracing::debug!("Habit {} had {} duplicate completion(s)", record.id, dropped);
    }

    let habit = Habit {
        id: record.id,
        description: record.description,
        frequency: record.frequency,
        days,
        time_of_day,
        created_at: record.created_at,
        updated_at: record.updated_at,
        completions,
    };
    (habit, migrated)
}
