//! State shared by every command: loaded config, open store, and the clock.

use chrono::{Local, NaiveDateTime};
use habitroom_core::{AgendaBuilder, Config, TodoStore};

pub struct Session {
    pub config: Config,
    pub store: TodoStore,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let store = TodoStore::open(&config)?;
        tracing::debug!("Using data file {}", store.path().display());
        Ok(Self { config, store })
    }

    /// Reopen the store when `storage.*` settings no longer describe it.
    pub fn sync_store(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.config.data_file()?;
        let strategy = self.config.storage.id_strategy;
        if path == self.store.path() && strategy == self.store.id_strategy() {
            return Ok(());
        }
        self.store = TodoStore::open(&self.config)?;
        tracing::info!("Reopened data file {}", path.display());
        println!("Now using data file {}", path.display());
        Ok(())
    }

    pub fn agenda(&self) -> AgendaBuilder {
        AgendaBuilder::with_boundaries(self.config.day)
    }
}

/// Current local time.
///
/// `HABITROOM_NOW` (`YYYY-MM-DDTHH:MM:SS`) pins the clock for scripted runs.
pub fn now() -> NaiveDateTime {
    if let Ok(raw) = std::env::var("HABITROOM_NOW") {
        match raw.parse::<NaiveDateTime>() {
            Ok(pinned) => return pinned,
            Err(e) => tracing::warn!("Ignoring HABITROOM_NOW '{}': {}", raw, e),
        }
    }
    Local::now().naive_local()
}
