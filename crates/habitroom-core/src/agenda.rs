//! Agenda views over a store snapshot.
//!
//! Both views are pure functions of the records and the current local time:
//!
//! - **full** (`today`): incomplete tasks plus habits that are due and not
//!   yet checked off, regardless of time of day.
//! - **focused** (`next`): the same, but habits must also be relevant at the
//!   current clock time, and the list is cut to a small count.
//!
//! Tasks always come first in store order, followed by habits in store order.

use chrono::{NaiveDateTime, Weekday};
use serde::Serialize;
use std::num::IntErrorKind;

use crate::model::{Habit, HabitId, Task, TaskId};
use crate::schedule::{self, Frequency};
use crate::time_of_day::{DayBoundaries, Period, TimeOfDay};

/// Read access to tasks and habits, in store order.
pub trait AgendaSource {
    fn list_tasks(&self) -> &[Task];
    fn list_habits(&self) -> &[Habit];
}

/// Immutable copy of the store's records taken for one view computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
}

impl AgendaSource for Snapshot {
    fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn list_habits(&self) -> &[Habit] {
        &self.habits
    }
}

/// One actionable entry in an agenda.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AgendaItem {
    Task {
        id: TaskId,
        description: String,
        created_at: NaiveDateTime,
    },
    Habit {
        id: HabitId,
        description: String,
        frequency: Frequency,
        #[serde(serialize_with = "schedule::serialize_day_names")]
        days: Vec<Weekday>,
        time_of_day: TimeOfDay,
    },
}

impl AgendaItem {
    pub fn id(&self) -> u64 {
        match self {
            AgendaItem::Task { id, .. } | AgendaItem::Habit { id, .. } => *id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            AgendaItem::Task { description, .. } | AgendaItem::Habit { description, .. } => {
                description
            }
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, AgendaItem::Task { .. })
    }
}

impl From<&Task> for AgendaItem {
    fn from(task: &Task) -> Self {
        AgendaItem::Task {
            id: task.id,
            description: task.description.clone(),
            created_at: task.created_at,
        }
    }
}

impl From<&Habit> for AgendaItem {
    fn from(habit: &Habit) -> Self {
        AgendaItem::Habit {
            id: habit.id,
            description: habit.description.clone(),
            frequency: habit.frequency,
            days: habit.days.clone(),
            time_of_day: habit.time_of_day,
        }
    }
}

/// Number of items shown by the focused view, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusLimit(usize);

impl FocusLimit {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;
    pub const DEFAULT: FocusLimit = FocusLimit(3);

    /// Clamp any integer into range.
    pub fn new(requested: i64) -> Self {
        let clamped = requested.clamp(Self::MIN as i64, Self::MAX as i64);
        FocusLimit(clamped as usize)
    }

    /// Parse user input, falling back to [`FocusLimit::DEFAULT`].
    pub fn parse(input: Option<&str>) -> Self {
        Self::parse_or(input, Self::DEFAULT)
    }

    /// Parse user input. Absent, blank or non-numeric input yields `fallback`.
    pub fn parse_or(input: Option<&str>, fallback: FocusLimit) -> Self {
        let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return fallback;
        };
        match raw.parse::<i64>() {
            Ok(n) => Self::new(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => FocusLimit(Self::MAX),
                IntErrorKind::NegOverflow => FocusLimit(Self::MIN),
                _ => fallback,
            },
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for FocusLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of the focused view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusedAgenda {
    /// Part of the day at the time of computation.
    pub period: Period,
    /// At most `limit` items.
    pub items: Vec<AgendaItem>,
    /// How many matching items were left out.
    pub remaining: usize,
    pub limit: FocusLimit,
}

impl FocusedAgenda {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> usize {
        self.items.len() + self.remaining
    }
}

/// Builds agenda views using a set of day boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgendaBuilder {
    boundaries: DayBoundaries,
}

impl AgendaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundaries(boundaries: DayBoundaries) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &DayBoundaries {
        &self.boundaries
    }

    /// Everything actionable today, ignoring time of day.
    pub fn full<S: AgendaSource + ?Sized>(
        &self,
        source: &S,
        now: NaiveDateTime,
    ) -> Vec<AgendaItem> {
        self.collect(source, now, false)
    }

    /// Time-aware view cut to `limit` items.
    pub fn focused<S: AgendaSource + ?Sized>(
        &self,
        source: &S,
        now: NaiveDateTime,
        limit: FocusLimit,
    ) -> FocusedAgenda {
        let mut items = self.collect(source, now, true);
        let remaining = items.len().saturating_sub(limit.get());
        items.truncate(limit.get());

        tracing::debug!(
            "focused agenda: {} shown, {} remaining (limit {})",
            items.len(),
            remaining,
            limit.get()
        );

        FocusedAgenda {
            period: self.boundaries.current_period(now.time()),
            items,
            remaining,
            limit,
        }
    }

    fn collect<S: AgendaSource + ?Sized>(
        &self,
        source: &S,
        now: NaiveDateTime,
        time_aware: bool,
    ) -> Vec<AgendaItem> {
        let today = now.date();
        let clock = now.time();

        let tasks = source
            .list_tasks()
            .iter()
            .filter(|task| !task.completed)
            .map(AgendaItem::from);

        let habits = source
            .list_habits()
            .iter()
            .filter(|habit| habit.is_pending_on(today))
            .filter(|habit| {
                !time_aware || self.boundaries.is_relevant_now(habit.time_of_day, clock)
            })
            .map(AgendaItem::from);

        tasks.chain(habits).collect()
    }
}

/// Full agenda with default day boundaries.
pub fn full_agenda<S: AgendaSource + ?Sized>(source: &S, now: NaiveDateTime) -> Vec<AgendaItem> {
    AgendaBuilder::new().full(source, now)
}

/// Focused agenda with default day boundaries.
pub fn focused_agenda<S: AgendaSource + ?Sized>(
    source: &S,
    now: NaiveDateTime,
    limit: FocusLimit,
) -> FocusedAgenda {
    AgendaBuilder::new().focused(source, now, limit)
}
