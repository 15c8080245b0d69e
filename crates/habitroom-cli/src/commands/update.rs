//! `update task` and `update habit`.

use clap::Subcommand;
use habitroom_core::model::parse_id;
use habitroom_core::schedule::{parse_days, weekday_name};
use habitroom_core::{Frequency, HabitUpdate, StoreError, TimeOfDay};

use crate::session::{self, Session};

#[derive(Subcommand)]
pub enum UpdateTarget {
    /// Replace a task's description
    Task {
        /// Task ID
        id: String,
        /// New description
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
    /// Change one field of a habit
    Habit {
        /// Habit ID
        id: String,
        /// desc, days, freq or time
        field: String,
        /// New value
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
}

/// Habit field named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitField {
    Description,
    Days,
    Frequency,
    Time,
}

impl std::str::FromStr for HabitField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desc" | "description" => Ok(HabitField::Description),
            "days" => Ok(HabitField::Days),
            "freq" | "frequency" => Ok(HabitField::Frequency),
            "time" => Ok(HabitField::Time),
            other => Err(format!("Unknown field '{other}'. Use: desc, days, freq, or time")),
        }
    }
}

/// Turn a field and raw value into a partial update.
pub fn habit_update(
    field: HabitField,
    value: &str,
) -> Result<HabitUpdate, Box<dyn std::error::Error>> {
    let mut update = HabitUpdate::default();
    match field {
        HabitField::Description => update.description = Some(value.to_string()),
        HabitField::Days => update.days = Some(parse_days(value)?),
        HabitField::Frequency => update.frequency = Some(value.parse::<Frequency>()?),
        HabitField::Time => update.time_of_day = Some(value.parse::<TimeOfDay>()?),
    }
    Ok(update)
}

fn day_list(days: &[chrono::Weekday]) -> String {
    days.iter()
        .map(|d| weekday_name(*d))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(session: &mut Session, target: UpdateTarget) -> Result<(), Box<dyn std::error::Error>> {
    let now = session::now();
    match target {
        UpdateTarget::Task { id, description } => {
            let id = parse_id(&id)?;
            let description = description.join(" ");
            let current = session
                .store
                .get_task(id)
                .ok_or(StoreError::TaskNotFound(id))?
                .description
                .clone();

            session.store.update_task(id, &description, now)?;
            println!("\n📝 Current: {current}");
            println!("   New:     {}\n", description.trim());
            println!("✅ Task {id} updated!");
        }
        UpdateTarget::Habit { id, field, value } => {
            let id = parse_id(&id)?;
            let field: HabitField = field.parse()?;
            let value = value.join(" ");
            let update = habit_update(field, &value)?;
            let before = session
                .store
                .get_habit(id)
                .ok_or(StoreError::HabitNotFound(id))?
                .clone();

            session.store.update_habit(id, update, now)?;
            let after = session
                .store
                .get_habit(id)
                .ok_or(StoreError::HabitNotFound(id))?;

            match field {
                HabitField::Description => {
                    println!("\n📝 Current: {}", before.description);
                    println!("   New:     {}\n", after.description);
                    println!("✅ Habit {id} description updated!");
                }
                HabitField::Days => {
                    println!("\n📝 Current days: {}", day_list(&before.days));
                    println!("   New days:     {}\n", day_list(&after.days));
                    println!("✅ Habit {id} days updated!");
                }
                HabitField::Frequency => {
                    println!("\n📝 Current frequency: {}", before.frequency);
                    println!("   New frequency:     {}\n", after.frequency);
                    println!("✅ Habit {id} frequency updated!");
                    if after.frequency == Frequency::Daily && !before.days.is_empty() {
                        println!("   Note: Cleared weekly days (now daily)");
                    }
                    if after.frequency == Frequency::Weekly && after.days.is_empty() {
                        println!("   Note: Set days with 'update habit {id} days <days>'");
                    }
                }
                HabitField::Time => {
                    println!("\n📝 Current time: {}", before.time_of_day.label());
                    println!("   New time:     {}\n", after.time_of_day.label());
                    println!("✅ Habit {id} time updated!");
                }
            }
        }
    }
    Ok(())
}
