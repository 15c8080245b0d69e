//! Plain-text rendering of agendas and lists.

use chrono::NaiveDate;
use habitroom_core::schedule;
use habitroom_core::{AgendaItem, FocusedAgenda, Habit, Period, Task, TimeOfDay};

const WIDTH: usize = 70;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn centered(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}

/// Full agenda, grouped into tasks then habits.
pub fn today(items: &[AgendaItem]) -> String {
    if items.is_empty() {
        return "\n🎉 Great! You have nothing due today!\n".to_string();
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule(WIDTH));
    out.push('\n');
    out.push_str(&centered("TODAY'S AGENDA", WIDTH));
    out.push('\n');
    out.push_str(&rule(WIDTH));
    out.push('\n');

    let tasks: Vec<&AgendaItem> = items.iter().filter(|i| i.is_task()).collect();
    let habits: Vec<&AgendaItem> = items.iter().filter(|i| !i.is_task()).collect();

    if !tasks.is_empty() {
        out.push_str("\n📋 TASKS:\n");
        for item in &tasks {
            out.push_str(&format!("  [{}] {}\n", item.id(), item.description()));
        }
    }

    if !habits.is_empty() {
        out.push_str("\n🔄 HABITS:\n");
        for item in &habits {
            if let AgendaItem::Habit {
                id,
                description,
                frequency,
                days,
                time_of_day,
            } = item
            {
                out.push_str(&format!("  [{id}] {description}\n"));
                out.push_str(&format!(
                    "       {} | {}\n",
                    time_of_day.label(),
                    schedule::describe(*frequency, days)
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&rule(WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "Total: {} task(s), {} habit(s)\n",
        tasks.len(),
        habits.len()
    ));
    out.push_str(&rule(WIDTH));
    out.push('\n');
    out
}

fn period_label(period: Period) -> String {
    TimeOfDay::from(period).label()
}

/// Focused agenda with a period banner and a remaining-count tip.
pub fn next(agenda: &FocusedAgenda) -> String {
    if agenda.is_empty() {
        return format!(
            "\n🎉 Nothing to do right now! (Current time: {})\n\
             💡 Tip: Use 'today' to see your full agenda\n",
            period_label(agenda.period)
        );
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule(WIDTH));
    out.push('\n');
    out.push_str(&centered(
        &format!("NEXT {} ITEM(S) TO FOCUS ON", agenda.items.len()),
        WIDTH,
    ));
    out.push('\n');
    out.push_str(&centered(&period_label(agenda.period), WIDTH));
    out.push('\n');
    out.push_str(&rule(WIDTH));
    out.push_str("\n\n");

    for (n, item) in agenda.items.iter().enumerate() {
        match item {
            AgendaItem::Task { id, description, .. } => {
                out.push_str(&format!("{}. 📋 [{id}] {description}\n", n + 1));
                out.push_str("   Type: Task\n\n");
            }
            AgendaItem::Habit {
                id,
                description,
                frequency,
                days,
                time_of_day,
            } => {
                out.push_str(&format!("{}. 🔄 [{id}] {description}\n", n + 1));
                out.push_str(&format!(
                    "   Type: Habit | {} | {}\n\n",
                    time_of_day.label(),
                    schedule::describe(*frequency, days)
                ));
            }
        }
    }

    out.push_str(&rule(WIDTH));
    out.push('\n');

    if agenda.remaining > 0 {
        out.push_str(&format!(
            "\n💡 Tip: You have {} more item(s) for now. Type 'today' to see all.\n",
            agenda.remaining
        ));
    }
    out
}

/// Task table for `view tasks`.
pub fn task_table(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "📭 No tasks found\n".to_string();
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule(WIDTH));
    out.push('\n');
    out.push_str(&centered("ALL TASKS", WIDTH));
    out.push('\n');
    out.push_str(&rule(WIDTH));
    out.push('\n');
    out.push_str(&format!("{:<5} {:<12} {:<50}\n", "ID", "Status", "Task"));
    out.push_str(&rule(WIDTH));
    out.push('\n');

    for task in tasks {
        let status = if task.completed { "✓ Done" } else { "○ Pending" };
        out.push_str(&format!("{:<5} {:<12} {:<50}\n", task.id, status, task.description));
    }

    out.push_str(&rule(WIDTH));
    out.push('\n');
    out
}

/// Status of a habit on a given day.
pub fn habit_status(habit: &Habit, today: NaiveDate) -> &'static str {
    if !habit.is_due_on(today) {
        "— Not Due"
    } else if habit.is_completed_on(today) {
        "✓ Done Today"
    } else {
        "○ Due Today"
    }
}

/// Habit table for `view habits`.
pub fn habit_table(habits: &[Habit], today: NaiveDate) -> String {
    if habits.is_empty() {
        return "📭 No habits found\n".to_string();
    }

    const HABIT_WIDTH: usize = 95;
    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule(HABIT_WIDTH));
    out.push('\n');
    out.push_str(&centered("ALL HABITS", HABIT_WIDTH));
    out.push('\n');
    out.push_str(&rule(HABIT_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<5} {:<15} {:<28} {:<13} {:<30}\n",
        "ID", "Status", "Frequency", "Time", "Habit"
    ));
    out.push_str(&rule(HABIT_WIDTH));
    out.push('\n');

    for habit in habits {
        out.push_str(&format!(
            "{:<5} {:<15} {:<28} {:<13} {:<30}\n",
            habit.id,
            habit_status(habit, today),
            habit.frequency_label(),
            habit.time_of_day.label(),
            habit.description
        ));
    }

    out.push_str(&rule(HABIT_WIDTH));
    out.push('\n');
    out
}
