//! `done` and `check`: completing tasks and habits.

use habitroom_core::model::parse_id;
use habitroom_core::storage::CompletedItem;
use habitroom_core::{CompletionOutcome, StoreError};

use super::ItemKind;
use crate::session::{self, Session};

const USAGE: &str = "Usage: done <id> | done task <id> | done habit <id>";

fn report_task(id: u64, outcome: CompletionOutcome) {
    match outcome {
        CompletionOutcome::Recorded => println!("✅ Task {id} marked as completed!"),
        CompletionOutcome::AlreadyCompleted => println!("ℹ️  Task {id} is already completed"),
    }
}

fn report_habit(id: u64, outcome: CompletionOutcome) {
    match outcome {
        CompletionOutcome::Recorded => println!("✅ Habit {id} checked off for today!"),
        CompletionOutcome::AlreadyCompleted => {
            println!("ℹ️  Habit {id} is already checked off for today")
        }
    }
}

/// `done <id>`, `done task <id>` or `done habit <id>`.
pub fn run(session: &mut Session, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let now = session::now();
    match args {
        [id] => {
            let id = parse_id(id)?;
            match session.store.complete_any(id, now) {
                Ok(CompletedItem::Task(outcome)) => report_task(id, outcome),
                Ok(CompletedItem::Habit(outcome)) => report_habit(id, outcome),
                Err(StoreError::TaskNotFound(_)) => {
                    return Err(format!("Item {id} not found").into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        [kind, id] => {
            let kind: ItemKind = kind.parse()?;
            let id = parse_id(id)?;
            match kind {
                ItemKind::Task => {
                    let outcome = session.store.complete_task(id, now)?;
                    report_task(id, outcome);
                }
                ItemKind::Habit => {
                    let outcome = session.store.complete_habit_today(id, now)?;
                    report_habit(id, outcome);
                }
            }
        }
        _ => return Err(USAGE.into()),
    }
    Ok(())
}

/// `check <id>`: shorthand for `done habit <id>`.
pub fn complete_habit(session: &mut Session, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(id)?;
    let outcome = session.store.complete_habit_today(id, session::now())?;
    report_habit(id, outcome);
    Ok(())
}
