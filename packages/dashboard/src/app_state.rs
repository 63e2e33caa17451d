//! Application-wide system registry shared by all controllers.

use std::cmp::Ordering;
use std::sync::{Mutex, PoisonError, RwLock};

use api::{ApiError, SystemService};
use garden_core::{SystemId, SystemSummary};
use tokio::sync::watch;

/// One-shot signal that the system registry has loaded.
///
/// Cloning is cheap; every clone observes the same resolution.
#[derive(Debug, Clone)]
pub struct ReadySignal {
    rx: watch::Receiver<bool>,
}

/// Resolving half of a [`ReadySignal`].
#[derive(Debug)]
pub struct ReadyTrigger {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    /// A signal paired with the trigger that resolves it.
    pub fn pending() -> (ReadyTrigger, ReadySignal) {
        let (tx, rx) = watch::channel(false);
        (ReadyTrigger { tx }, ReadySignal { rx })
    }

    /// A signal that is already resolved.
    pub fn resolved() -> Self {
        let (trigger, signal) = Self::pending();
        trigger.resolve();
        signal
    }

    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for resolution. Returns false if the trigger was dropped unresolved.
    pub async fn wait(&self) -> bool {
        let mut rx = self.rx.clone();
        rx.wait_for(|ready| *ready).await.is_ok()
    }
}

impl ReadyTrigger {
    /// Resolve the signal. Later calls are no-ops.
    pub fn resolve(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_resolved(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Read-only view of the shared application state.
pub trait AppState: Send + Sync {
    /// Signal that resolves once systems are loaded.
    fn systems_ready(&self) -> ReadySignal;

    fn find_system_by_id(&self, id: &SystemId) -> Option<SystemSummary>;

    /// Version segment used in URLs: `latest` for the newest version of a
    /// system name, otherwise the system's own version.
    fn resolve_version(&self, system: &SystemSummary) -> String;

    /// Route of a system's detail page.
    fn build_system_url(&self, id: &SystemId) -> String;
}

/// Compare dotted version strings, numerically where both parts are numbers.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn version_for_url(system: &SystemSummary, registry: &[SystemSummary]) -> String {
    let newest = registry
        .iter()
        .filter(|s| s.name == system.name)
        .map(|s| s.version.as_str())
        .max_by(|a, b| compare_versions(a, b));

    match newest {
        Some(version) if compare_versions(version, &system.version) == Ordering::Equal => {
            "latest".to_string()
        }
        _ => system.version.clone(),
    }
}

/// Production [`AppState`]: an in-memory registry filled from the backend.
#[derive(Debug)]
pub struct SharedAppState {
    systems: RwLock<Vec<SystemSummary>>,
    ready: Mutex<(ReadyTrigger, ReadySignal)>,
}

impl SharedAppState {
    /// An empty registry whose ready signal is still pending.
    pub fn new() -> Self {
        Self {
            systems: RwLock::new(Vec::new()),
            ready: Mutex::new(ReadySignal::pending()),
        }
    }

    /// A registry that starts out loaded with `systems`.
    pub fn with_systems(systems: Vec<SystemSummary>) -> Self {
        let state = Self::new();
        state.set_systems(systems);
        state
    }

    /// Replace the registry and resolve the ready signal.
    pub fn set_systems(&self, systems: Vec<SystemSummary>) {
        tracing::debug!("System registry holds {} systems", systems.len());
        *self.systems.write().unwrap_or_else(PoisonError::into_inner) = systems;
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .0
            .resolve();
    }

    /// Install a fresh pending signal, e.g. before reloading after a re-login.
    ///
    /// Controllers that re-capture `systems_ready` afterwards wait for the
    /// next `set_systems` or `refresh`.
    pub fn reset(&self) {
        *self.ready.lock().unwrap_or_else(PoisonError::into_inner) = ReadySignal::pending();
    }

    /// Load every system version from the backend into the registry.
    ///
    /// The ready signal resolves even when the load fails, so waiting pages
    /// still fetch; the registry keeps its previous contents in that case.
    pub async fn refresh(&self, service: &dyn SystemService) -> Result<usize, ApiError> {
        match service.list_systems(false).await {
            Ok(systems) => {
                let count = systems.len();
                self.set_systems(systems);
                tracing::info!("Loaded {} systems", count);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Failed to load systems: {}", e);
                self.ready
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .0
                    .resolve();
                Err(e)
            }
        }
    }

    /// Snapshot of the registry.
    pub fn systems(&self) -> Vec<SystemSummary> {
        self.systems
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for SharedAppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState for SharedAppState {
    fn systems_ready(&self) -> ReadySignal {
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .1
            .clone()
    }

    fn find_system_by_id(&self, id: &SystemId) -> Option<SystemSummary> {
        self.systems
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|s| &s.id == id)
            .cloned()
    }

    fn resolve_version(&self, system: &SystemSummary) -> String {
        let systems = self.systems.read().unwrap_or_else(PoisonError::into_inner);
        version_for_url(system, &systems)
    }

    fn build_system_url(&self, id: &SystemId) -> String {
        match self.find_system_by_id(id) {
            Some(system) => format!("/systems/{}/{}", system.name, self.resolve_version(&system)),
            None => format!("/systems/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn registry() -> SharedAppState {
        SharedAppState::with_systems(vec![
            SystemSummary::new("a", "echo", "1.0.0"),
            SystemSummary::new("b", "echo", "1.10.0"),
            SystemSummary::new("c", "echo", "1.9.0"),
            SystemSummary::new("d", "sleeper", "0.1.0.dev0"),
        ])
    }

    #[test]
    fn compares_numeric_segments_numerically() {
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0", "2.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.0.dev1", "1.0.0.dev0"), Ordering::Greater);
    }

    #[test]
    fn newest_version_resolves_to_latest() {
        let state = registry();
        let newest = state.find_system_by_id(&SystemId::from("b"));
        let older = state.find_system_by_id(&SystemId::from("c"));
        assert_eq!(newest.map(|s| state.resolve_version(&s)).as_deref(), Some("latest"));
        assert_eq!(older.map(|s| state.resolve_version(&s)).as_deref(), Some("1.9.0"));
    }

    #[test]
    fn builds_system_urls() {
        let state = registry();
        assert_eq!(state.build_system_url(&SystemId::from("b")), "/systems/echo/latest");
        assert_eq!(state.build_system_url(&SystemId::from("a")), "/systems/echo/1.0.0");
        assert_eq!(state.build_system_url(&SystemId::from("d")), "/systems/sleeper/latest");
        assert_eq!(state.build_system_url(&SystemId::from("zz")), "/systems/zz");
    }

    #[tokio::test]
    async fn ready_signal_resolves_once_systems_are_set() {
        let state = SharedAppState::new();
        let signal = state.systems_ready();
        assert!(!signal.is_ready());

        let waiter = tokio::spawn({
            let signal = signal.clone();
            async move { signal.wait().await }
        });
        state.set_systems(Vec::new());

        let resolved = tokio::time::timeout(Duration::from_secs(1), waiter).await;
        assert!(matches!(resolved, Ok(Ok(true))));
        assert!(state.systems_ready().is_ready());
    }

    #[tokio::test]
    async fn reset_installs_a_new_pending_signal() {
        let state = registry();
        let old = state.systems_ready();
        state.reset();

        assert!(old.is_ready());
        assert!(!state.systems_ready().is_ready());
    }

    #[tokio::test]
    async fn dropped_trigger_reports_unresolved() {
        let (trigger, signal) = ReadySignal::pending();
        drop(trigger);
        assert!(!signal.wait().await);
        assert!(ReadySignal::resolved().wait().await);
    }
}
