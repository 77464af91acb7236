//! ToolContext - shared state handed to every tool execution

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use eyre::Result;

use crate::config::{Config, SyncConfig};
use crate::store::{CoachingStore, PlanStore, RunStore};
use crate::strava::StravaClient;
use crate::tools::ToolError;

/// Everything a tool needs: the optional Strava client and the local stores
///
/// The client is optional so storage-only tools keep working without
/// credentials; activity tools fail soft with a clear message.
pub struct ToolContext {
    client: Option<Arc<StravaClient>>,
    pub runs: RunStore,
    pub plans: PlanStore,
    pub coaching: CoachingStore,
    pub sync: SyncConfig,
    today: Option<NaiveDate>,
}

impl ToolContext {
    /// Build a context from configuration, opening the stores
    pub fn new(config: &Config, client: Option<Arc<StravaClient>>) -> Result<Self> {
        let data_dir = &config.storage.data_dir;
        Ok(Self {
            client,
            runs: RunStore::open(data_dir)?,
            plans: PlanStore::open(data_dir)?,
            coaching: CoachingStore::open(data_dir, config.coaching.max_session_notes)?,
            sync: config.sync.clone(),
            today: None,
        })
    }

    /// Pin "today" to a fixed date (tests and reproducible reports)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The date used for adherence and upcoming-workout calculations
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// The Strava client, if credentials were configured
    pub fn client(&self) -> Result<&StravaClient, ToolError> {
        self.client.as_deref().ok_or(ToolError::ClientNotConfigured)
    }

    /// Whether a Strava client is available
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_without_client() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = temp.path().to_path_buf();

        let ctx = ToolContext::new(&config, None).unwrap();
        assert!(!ctx.has_client());
        assert!(matches!(ctx.client(), Err(ToolError::ClientNotConfigured)));
    }

    #[test]
    fn test_today_override() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = temp.path().to_path_buf();

        let pinned = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let ctx = ToolContext::new(&config, None).unwrap().with_today(pinned);
        assert_eq!(ctx.today(), pinned);
    }
}
