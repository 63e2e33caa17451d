//! Dismissible notifications raised by dashboard actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for an alert, used as a stable render key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub Ulid);

impl AlertId {
    /// Create a new unique alert ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Danger,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Danger => "danger",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification shown after an action completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub kind: AlertKind,
    pub msg: String,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Create a success alert.
    pub fn success(msg: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, msg)
    }

    /// Create a danger alert.
    pub fn danger(msg: impl Into<String>) -> Self {
        Self::new(AlertKind::Danger, msg)
    }

    fn new(kind: AlertKind, msg: impl Into<String>) -> Self {
        Self {
            id: AlertId::new(),
            kind,
            msg: msg.into(),
            created_at: Utc::now(),
        }
    }
}

/// Alerts in creation order.
///
/// Only `push` adds and only `dismiss` removes, so the remaining entries
/// always keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertList {
    alerts: Vec<Alert>,
}

impl AlertList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert.
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Remove the alert at `index`. Out-of-range indices are ignored.
    pub fn dismiss(&mut self, index: usize) -> Option<Alert> {
        if index < self.alerts.len() {
            Some(self.alerts.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Alert> {
        self.alerts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    /// Borrow the alerts as a slice.
    pub fn as_slice(&self) -> &[Alert] {
        &self.alerts
    }
}

impl<'a> IntoIterator for &'a AlertList {
    type Item = &'a Alert;
    type IntoIter = std::slice::Iter<'a, Alert>;

    fn into_iter(self) -> Self::IntoIter {
        self.alerts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(list: &AlertList) -> Vec<&str> {
        list.iter().map(|a| a.msg.as_str()).collect()
    }

    #[test]
    fn dismiss_middle_keeps_order() {
        let mut list = AlertList::new();
        list.push(Alert::success("A"));
        list.push(Alert::danger("B"));
        list.push(Alert::success("C"));

        let removed = list.dismiss(1);
        assert_eq!(removed.map(|a| a.msg), Some("B".to_string()));
        assert_eq!(messages(&list), vec!["A", "C"]);
    }

    #[test]
    fn dismiss_out_of_range_is_noop() {
        let mut list = AlertList::new();
        list.push(Alert::success("A"));

        assert!(list.dismiss(1).is_none());
        assert!(list.dismiss(usize::MAX).is_none());
        assert_eq!(messages(&list), vec!["A"]);
    }

    #[test]
    fn alert_ids_are_unique() {
        let a = Alert::success("same");
        let b = Alert::success("same");
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind, AlertKind::Success);
        assert_eq!(Alert::danger("x").kind.as_str(), "danger");
    }
}
