use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use marquee_core::{Config, DataLoader, SanitizedConfig};

use crate::sessions::SessionStore;

/// Shared application state
pub struct AppState {
    config: Config,
    loader: Arc<DataLoader>,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, loader: Arc<DataLoader>) -> Self {
        let idle_timeout = Duration::from_secs(config.sessions.idle_timeout_secs);
        Self {
            config,
            loader,
            sessions: SessionStore::new(idle_timeout),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn loader(&self) -> &DataLoader {
        self.loader.as_ref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn page_size(&self) -> usize {
        self.config.catalog.page_size
    }

    /// The calendar day the catalog shuffle is keyed on (server local time).
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
