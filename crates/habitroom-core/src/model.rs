//! Task and habit records as the rest of the crate sees them.
//!
//! These are the validated, in-memory shapes. The on-disk layout lives in
//! [`crate::storage::record`] and is converted through an explicit
//! normalize step on load.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

use crate::completion;
use crate::error::ValidationError;
use crate::schedule::{self, Frequency};
use crate::time_of_day::TimeOfDay;

/// Task identifier (positive integer).
pub type TaskId = u64;

/// Habit identifier (positive integer).
pub type HabitId = u64;

/// A one-off task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A recurring habit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Habit {
    pub id: HabitId,
    pub description: String,
    pub frequency: Frequency,
    /// Only meaningful for weekly habits; empty for daily ones.
    #[serde(serialize_with = "schedule::serialize_day_names")]
    pub days: Vec<Weekday>,
    pub time_of_day: TimeOfDay,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    /// Dates this habit was checked off, each at most once.
    pub completions: Vec<NaiveDate>,
}

impl Habit {
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        schedule::is_due_on(self.frequency, &self.days, date)
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        completion::is_completed_today(&self.completions, date)
    }

    /// Due on `date` and not yet checked off.
    pub fn is_pending_on(&self, date: NaiveDate) -> bool {
        self.is_due_on(date) && !self.is_completed_on(date)
    }

    /// `Daily` or `Weekly (Monday, Friday)`.
    pub fn frequency_label(&self) -> String {
        schedule::describe(self.frequency, &self.days)
    }
}

/// Trim a description and reject it when empty.
pub fn validate_description(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyDescription)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a user-supplied ID.
pub fn parse_id(raw: &str) -> Result<u64, ValidationError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidId(raw.to_string())),
    }
}

/// Validated input for a new habit.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitSpec {
    pub description: String,
    pub frequency: Frequency,
    pub days: Vec<Weekday>,
    pub time_of_day: TimeOfDay,
}

impl HabitSpec {
    pub fn daily(description: &str, time_of_day: TimeOfDay) -> Result<Self, ValidationError> {
        Ok(Self {
            description: validate_description(description)?,
            frequency: Frequency::Daily,
            days: Vec::new(),
            time_of_day,
        })
    }

    pub fn weekly(
        description: &str,
        days: Vec<Weekday>,
        time_of_day: TimeOfDay,
    ) -> Result<Self, ValidationError> {
        if days.is_empty() {
            return Err(ValidationError::MissingDays);
        }
        Ok(Self {
            description: validate_description(description)?,
            frequency: Frequency::Weekly,
            days,
            time_of_day,
        })
    }
}

/// Partial update applied by [`crate::storage::TodoStore::update_habit`].
///
/// Switching to daily clears the day list. Days may only be set when the
/// resulting frequency is weekly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitUpdate {
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub days: Option<Vec<Weekday>>,
    pub time_of_day: Option<TimeOfDay>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.frequency.is_none()
            && self.days.is_none()
            && self.time_of_day.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(frequency: Frequency, days: Vec<Weekday>) -> Habit {
        Habit {
            id: 1,
            description: "Stretch".to_string(),
            frequency,
            days,
            time_of_day: TimeOfDay::Anytime,
            created_at: NaiveDate::from_ymd_opt(2024, 4, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            updated_at: None,
            completions: Vec::new(),
        }
    }

    #[test]
    fn pending_requires_due_and_not_completed() {
        // 2024-05-01 was a Wednesday.
        let wednesday = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut h = habit(Frequency::Weekly, vec![Weekday::Wed]);
        assert!(h.is_pending_on(wednesday));

        h.completions.push(wednesday);
        assert!(h.is_due_on(wednesday));
        assert!(!h.is_pending_on(wednesday));

        let thursday = wednesday.succ_opt().unwrap();
        assert!(!h.is_pending_on(thursday));
    }

    #[test]
    fn descriptions_are_trimmed_and_required() {
        assert_eq!(validate_description("  Buy milk ").unwrap(), "Buy milk");
        assert_eq!(validate_description("   "), Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-2").is_err());
        assert!(parse_id("seven").is_err());
    }

    #[test]
    fn weekly_spec_needs_days() {
        assert_eq!(
            HabitSpec::weekly("Gym", Vec::new(), TimeOfDay::Afternoon),
            Err(ValidationError::MissingDays)
        );
        let spec = HabitSpec::daily("Brush teeth", TimeOfDay::Morning).unwrap();
        assert!(spec.days.is_empty());
        assert_eq!(spec.frequency, Frequency::Daily);
    }

    #[test]
    fn habit_serializes_day_names() {
        let h = habit(Frequency::Weekly, vec![Weekday::Mon, Weekday::Fri]);
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["days"], serde_json::json!(["Monday", "Friday"]));
        assert_eq!(json["time_of_day"], "anytime");
        assert_eq!(h.frequency_label(), "Weekly (Monday, Friday)");
    }
}
