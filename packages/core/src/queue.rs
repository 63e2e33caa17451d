//! Queue rows as reported by the backend.

use serde::{Deserialize, Serialize};

use crate::SystemId;

/// One message queue belonging to a system instance.
///
/// Rows carry no identity across fetches; every poll replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRow {
    /// Name of the owning system.
    pub system: String,
    /// Version of the owning system.
    pub version: String,
    /// Instance the queue feeds.
    pub instance: String,
    /// Broker-level queue name.
    pub name: String,
    /// Number of messages currently queued.
    #[serde(default)]
    pub size: u64,
    /// Display name of the owning system, if the backend knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Identifier of the owning system in the system registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<SystemId>,
}

impl QueueRow {
    /// Create a row with no display name and no registry id.
    pub fn new(
        system: impl Into<String>,
        version: impl Into<String>,
        instance: impl Into<String>,
        name: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            system: system.into(),
            version: version.into(),
            instance: instance.into(),
            name: name.into(),
            size,
            display: None,
            system_id: None,
        }
    }

    /// Set the display name.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Set the owning system's registry id.
    pub fn with_system_id(mut self, id: impl Into<SystemId>) -> Self {
        self.system_id = Some(id.into());
        self
    }
}

/// Observable progress of a controller's primary fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    Failed,
}

impl LoadState {
    /// Whether a fetch has completed, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed)
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadState::Idle => write!(f, "idle"),
            LoadState::Loading => write!(f, "loading"),
            LoadState::Loaded => write!(f, "loaded"),
            LoadState::Failed => write!(f, "failed"),
        }
    }
}
