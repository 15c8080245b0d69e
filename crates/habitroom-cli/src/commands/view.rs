//! `view`: full task and habit lists.

use clap::Subcommand;
use habitroom_core::{AgendaSource, Habit, Task};
use serde::Serialize;

use crate::render;
use crate::session::{self, Session};

#[derive(Subcommand)]
pub enum ViewTarget {
    /// Incomplete tasks, or every task with `all`
    Tasks {
        /// `all` to include completed tasks
        #[arg(value_parser = ["all"])]
        scope: Option<String>,
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Every habit with its status for today
    Habits {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct HabitRow<'a> {
    #[serde(flatten)]
    habit: &'a Habit,
    due_today: bool,
    completed_today: bool,
}

pub fn run(
    session: &mut Session,
    target: Option<ViewTarget>,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = target.unwrap_or(ViewTarget::Tasks {
        scope: None,
        json: false,
    });

    match target {
        ViewTarget::Tasks { scope, json } => {
            let show_completed = scope.as_deref() == Some("all");
            let tasks: Vec<&Task> = session.store.tasks(show_completed);
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", render::task_table(&tasks));
            }
        }
        ViewTarget::Habits { json } => {
            let today = session::now().date();
            let habits = session.store.list_habits();
            if json {
                let rows: Vec<HabitRow> = habits
                    .iter()
                    .map(|habit| HabitRow {
                        habit,
                        due_today: habit.is_due_on(today),
                        completed_today: habit.is_completed_on(today),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render::habit_table(habits, today));
            }
        }
    }
    Ok(())
}
