//! Command handlers shared by one-shot invocations and the shell.

pub mod add;
pub mod agenda;
pub mod config;
pub mod done;
pub mod remove;
pub mod shell;
pub mod update;
pub mod view;

use clap::ValueEnum;

use crate::session::Session;
use crate::Commands;

/// Which kind of record a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemKind {
    Task,
    Habit,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Task => "Task",
            ItemKind::Habit => "Habit",
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(ItemKind::Task),
            "habit" => Ok(ItemKind::Habit),
            _ => Err("Type must be 'task' or 'habit'".to_string()),
        }
    }
}

pub fn dispatch(
    command: Commands,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Today { json } => agenda::today(session, json),
        Commands::Next { count, json } => agenda::next(session, count.as_deref(), json),
        Commands::Add { words } => add::run(session, &words),
        Commands::Done { args } => done::run(session, &args),
        Commands::Check { id } => done::complete_habit(session, &id),
        Commands::Remove { kind, id } => remove::run(session, kind, &id),
        Commands::Update { target } => update::run(session, target),
        Commands::View { target } => view::run(session, target),
        Commands::List { scope } => view::run(
            session,
            Some(view::ViewTarget::Tasks { scope, json: false }),
        ),
        Commands::Habits => view::run(session, Some(view::ViewTarget::Habits { json: false })),
        Commands::Config { action } => {
            config::run_with(action, &mut session.config)?;
            session.sync_store()
        }
        Commands::Shell => {
            println!("Already in the shell.");
            Ok(())
        }
    }
}
