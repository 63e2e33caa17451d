//! Dashboard behaviour settings.

use std::time::Duration;

use api::config::env_or;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Tunables shared by the dashboard controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// How often the queue table silently reloads.
    pub poll_interval: Duration,
    /// Rows per table page.
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5000),
            page_size: 10,
        }
    }
}

impl DashboardConfig {
    /// Read `BEERGARDEN_POLL_MS` and `BEERGARDEN_PAGE_SIZE`, falling back to defaults.
    pub fn from_env() -> Self {
        let poll_ms = env_or("BEERGARDEN_POLL_MS", 5000u64);
        Self {
            poll_interval: Duration::from_millis(poll_ms).max(MIN_POLL_INTERVAL),
            page_size: env_or("BEERGARDEN_PAGE_SIZE", 10usize).max(1),
        }
    }

    /// Set the poll interval, at least one millisecond.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
