mod config;
pub mod migrations;
pub mod record;
pub mod todo_store;

pub use config::{AgendaConfig, Config, IdStrategy, StorageConfig};
pub use todo_store::{CompletedItem, TodoStore};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// Resolution order:
/// - `HABITROOM_HOME` when set (used by tests),
/// - `~/.config/habitroom-dev/` when `HABITROOM_ENV=dev`,
/// - `~/.config/habitroom/` otherwise.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("HABITROOM_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITROOM_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("habitroom-dev")
            } else {
                base_dir.join("habitroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
