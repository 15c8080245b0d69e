use clap::Subcommand;
use habitroom_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "day.afternoon_opens", "agenda.default_focus_count")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    run_with(action, &mut config)
}

/// Run against an already loaded config; the shell keeps its copy current.
pub fn run_with(
    action: ConfigAction,
    config: &mut Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(ConfigError::UnknownKey(key).into()),
        },
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(&*config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            *config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
