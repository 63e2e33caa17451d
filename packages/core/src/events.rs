//! Application-wide notifications.

use serde::{Deserialize, Serialize};

/// Events broadcast to every live controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// The logged-in user changed (login, logout, re-login).
    UserChanged,
}

impl AppEvent {
    /// Get a short description of this event for logging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::UserChanged => "user changed",
        }
    }
}
