//! Core error types for habitroom-core.
//!
//! This module defines the error hierarchy using thiserror. Evaluators in
//! the core never fail; errors come from parsing user input, the JSON store
//! and the TOML configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by the JSON task/habit store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the data file
    #[error("Failed to access data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not valid JSON of the expected shape
    #[error("Failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize records
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No task with this ID
    #[error("Task {0} not found")]
    TaskNotFound(u64),

    /// No habit with this ID
    #[error("Habit {0} not found")]
    HabitNotFound(u64),

    /// Days were given for a habit that is not weekly
    #[error("Can only set days for weekly habits (habit {id} is {frequency})")]
    DaysOnNonWeekly { id: u64, frequency: String },

    /// The next ID after `last` does not fit in a u64
    #[error("No {kind} IDs left after {last}")]
    IdOverflow { kind: &'static str, last: u64 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to resolve the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Validation errors for values entering the system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown time-of-day token
    #[error("Invalid time '{0}'. Use: morning, afternoon, evening, anytime")]
    InvalidTimeOfDay(String),

    /// Unknown weekday names
    #[error("Invalid days: {}", .0.join(", "))]
    InvalidDays(Vec<String>),

    /// Unknown frequency token
    #[error("Frequency must be 'daily' or 'weekly', got '{0}'")]
    InvalidFrequency(String),

    /// ID is not a positive integer
    #[error("Please provide a valid ID (number), got '{0}'")]
    InvalidId(String),

    /// Weekly habit with no days
    #[error("Weekly habits need at least one day")]
    MissingDays,

    /// Empty description
    #[error("Please provide a description")]
    EmptyDescription,

    /// Malformed HH:MM clock value
    #[error("Invalid clock time '{0}', expected HH:MM")]
    InvalidClockTime(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
