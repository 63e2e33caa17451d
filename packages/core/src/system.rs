//! Registered systems as reported by the backend.

use serde::{Deserialize, Serialize};

/// Backend identifier of a system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(pub String);

impl SystemId {
    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SystemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SystemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A running instance of a system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Backend status string, e.g. `RUNNING` or `STOPPED`.
    #[serde(default)]
    pub status: String,
}

impl InstanceSummary {
    /// Whether the backend reports this instance as running.
    pub fn is_running(&self) -> bool {
        self.status.eq_ignore_ascii_case("running")
    }
}

/// A registered system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSummary {
    pub id: SystemId,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub instances: Vec<InstanceSummary>,
}

impl SystemSummary {
    /// Create a system with no instances.
    pub fn new(
        id: impl Into<SystemId>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: None,
            display_name: None,
            instances: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an instance.
    pub fn with_instance(mut self, name: impl Into<String>, status: impl Into<String>) -> Self {
        self.instances.push(InstanceSummary {
            id: None,
            name: name.into(),
            status: status.into(),
        });
        self
    }

    /// Display name when set and non-empty, otherwise the system name.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(display) if !display.is_empty() => display,
            _ => &self.name,
        }
    }

    /// Number of instances reported as running.
    pub fn running_instances(&self) -> usize {
        self.instances.iter().filter(|i| i.is_running()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_non_empty_display_name() {
        let plain = SystemSummary::new("1", "echo", "1.0.0");
        assert_eq!(plain.label(), "echo");

        let blank = SystemSummary::new("1", "echo", "1.0.0").with_display_name("");
        assert_eq!(blank.label(), "echo");

        let named = SystemSummary::new("1", "echo", "1.0.0").with_display_name("Echo Service");
        assert_eq!(named.label(), "Echo Service");
    }

    #[test]
    fn counts_running_instances_case_insensitively() {
        let system = SystemSummary::new("1", "echo", "1.0.0")
            .with_instance("a", "RUNNING")
            .with_instance("b", "STOPPED")
            .with_instance("c", "running");
        assert_eq!(system.running_instances(), 2);
    }
}
