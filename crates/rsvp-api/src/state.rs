//! Application state shared across handlers.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::ApiConfig;

/// Application state shared across all handlers.
///
/// The mock endpoint keeps no events of its own, so the state is just the
/// configuration plus the clock used for date validation.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Returns the current local date.
    today: Arc<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl AppState {
    /// Creates a new AppState using the system clock.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
            today: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// Replaces the clock, so validation can be pinned to a fixed day.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Arc::new(move || today);
        self
    }

    /// Returns today's date according to the state's clock.
    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }
}
