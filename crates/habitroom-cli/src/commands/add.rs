//! `add`: tasks by default, habits behind a `daily`/`weekly` keyword.

use habitroom_core::schedule::parse_days;
use habitroom_core::{Frequency, HabitSpec, TimeOfDay, ValidationError};

use crate::session::{self, Session};

/// What an `add` line asks for.
#[derive(Debug, PartialEq)]
pub enum AddRequest {
    Task(String),
    Habit(HabitSpec),
}

const DAILY_USAGE: &str =
    "Usage: add daily <time> <description>\n   Times: morning, afternoon, evening, anytime";
const WEEKLY_USAGE: &str = "Usage: add weekly <days> <time> <description>\n   \
    Example: add weekly monday,friday afternoon Go to gym";

/// Parse the words after `add`.
pub fn parse(words: &[String]) -> Result<AddRequest, Box<dyn std::error::Error>> {
    let Some(first) = words.first() else {
        return Err(ValidationError::EmptyDescription.into());
    };

    match first.to_lowercase().as_str() {
        "daily" => {
            if words.len() < 3 {
                return Err(DAILY_USAGE.into());
            }
            let time_of_day: TimeOfDay = words[1].parse()?;
            let spec = HabitSpec::daily(&words[2..].join(" "), time_of_day)?;
            Ok(AddRequest::Habit(spec))
        }
        "weekly" => {
            if words.len() < 4 {
                return Err(WEEKLY_USAGE.into());
            }
            let days = parse_days(&words[1])?;
            let time_of_day: TimeOfDay = words[2].parse()?;
            let spec = HabitSpec::weekly(&words[3..].join(" "), days, time_of_day)?;
            Ok(AddRequest::Habit(spec))
        }
        _ => Ok(AddRequest::Task(words.join(" "))),
    }
}

pub fn run(session: &mut Session, words: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let now = session::now();
    match parse(words)? {
        AddRequest::Task(description) => {
            let id = session.store.add_task(&description, now)?;
            println!("✅ Task added with ID: {id}");
        }
        AddRequest::Habit(spec) => {
            let frequency = spec.frequency;
            let time_of_day = spec.time_of_day;
            let id = session.store.add_habit(spec, now)?;
            let kind = if frequency == Frequency::Weekly {
                "Weekly"
            } else {
                "Daily"
            };
            println!("✅ {kind} habit added with ID: {id} {}", time_of_day.label());
        }
    }
    Ok(())
}
