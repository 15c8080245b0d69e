//! # Habitroom Core Library
//!
//! This library provides the core logic for Habitroom, a personal task and
//! habit tracker. The CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Time Classifier**: maps a clock time to morning/afternoon/evening and
//!   decides whether a habit's preferred time of day is relevant now
//! - **Schedule Evaluator**: daily and weekly-by-weekday due checks
//! - **Completion Tracker**: idempotent per-day habit completion
//! - **Agenda Builder**: the full (`today`) and focused (`next`) views, pure
//!   functions of a store snapshot and the current local time
//! - **Storage**: JSON data file with load-time normalization and TOML config
//!
//! ## Key Components
//!
//! - [`AgendaBuilder`]: builds agenda views for a set of [`DayBoundaries`]
//! - [`TodoStore`]: task/habit persistence
//! - [`Config`]: application configuration management

pub mod agenda;
pub mod completion;
pub mod error;
pub mod model;
pub mod schedule;
pub mod storage;
pub mod time_of_day;

pub use agenda::{
    focused_agenda, full_agenda, AgendaBuilder, AgendaItem, AgendaSource, FocusLimit,
    FocusedAgenda, Snapshot,
};
pub use completion::{is_completed_today, record_completion, CompletionOutcome};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use model::{Habit, HabitId, HabitSpec, HabitUpdate, Task, TaskId};
pub use schedule::{is_due_today, Frequency};
pub use storage::{Config, IdStrategy, TodoStore};
pub use time_of_day::{current_period, is_relevant_now, DayBoundaries, Period, TimeOfDay};
