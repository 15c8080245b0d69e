use clap::{Parser, Subcommand};

mod commands;
mod render;
mod session;

use session::Session;

#[derive(Parser)]
#[command(name = "habitroom", version, about = "Habitroom: tasks and time-aware habits")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all tasks & habits due today
    Today {
        /// Print the agenda as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the next few items to focus on (time-aware)
    Next {
        /// How many items to show (1-10, default 3)
        #[arg(allow_negative_numbers = true)]
        count: Option<String>,
        /// Print the agenda as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a task, or a habit with `daily`/`weekly`
    Add {
        /// `<description>`, `daily <time> <description>` or
        /// `weekly <days> <time> <description>`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Mark a task or habit as completed
    Done {
        /// `<id>`, `task <id>` or `habit <id>`
        #[arg(required = true, num_args = 1..=2)]
        args: Vec<String>,
    },
    /// Check off a habit for today (alias for `done habit <id>`)
    Check {
        /// Habit ID
        id: String,
    },
    /// Remove a task or habit
    Remove {
        /// `task` or `habit`
        kind: commands::ItemKind,
        /// Item ID
        id: String,
    },
    /// Update a task or habit
    Update {
        #[command(subcommand)]
        target: commands::update::UpdateTarget,
    },
    /// View full lists of tasks or habits
    View {
        #[command(subcommand)]
        target: Option<commands::view::ViewTarget>,
    },
    /// List tasks (alias for `view tasks`)
    List {
        /// `all` to include completed tasks
        #[arg(value_parser = ["all"])]
        scope: Option<String>,
    },
    /// List habits (alias for `view habits`)
    Habits,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive shell (default when no command is given)
    Shell,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env("HABITROOM_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(command: Option<Commands>) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Some(Commands::Config { action }) => commands::config::run(action),
        Some(Commands::Shell) | None => {
            let mut session = Session::open()?;
            commands::shell::run(&mut session)
        }
        Some(command) => {
            let mut session = Session::open()?;
            commands::dispatch(command, &mut session)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
