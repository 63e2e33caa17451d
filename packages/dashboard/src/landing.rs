//! Landing page controller: registered systems and navigation into them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use api::{ApiError, SystemService};
use garden_core::{AppEvent, LoadState, SystemSummary};
use tokio::sync::watch;

use crate::app_state::AppState;
use crate::events::{EventBus, Subscription};
use crate::navigator::Navigator;

/// Collaborators the landing page is built from.
#[derive(Clone)]
pub struct LandingPageDeps {
    pub systems: Arc<dyn SystemService>,
    pub app_state: Arc<dyn AppState>,
    pub events: EventBus,
    pub navigator: Arc<dyn Navigator>,
}

/// Snapshot of everything the landing page renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandingView {
    pub load_state: LoadState,
    pub systems: Vec<SystemSummary>,
    /// Message of the last failed load.
    pub error: Option<String>,
}

#[derive(Default)]
struct LandingState {
    response: Option<Result<Vec<SystemSummary>, ApiError>>,
    data: Vec<SystemSummary>,
    load_state: LoadState,
}

struct Shared {
    systems: Arc<dyn SystemService>,
    app_state: Arc<dyn AppState>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<LandingState>,
    view_tx: watch::Sender<LandingView>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, LandingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self) {
        let view = {
            let state = self.lock();
            LandingView {
                load_state: state.load_state,
                systems: state.data.clone(),
                error: match &state.response {
                    Some(Err(e)) => Some(e.to_string()),
                    _ => None,
                },
            }
        };
        self.view_tx.send_replace(view);
    }

    async fn load_systems(&self) {
        {
            let mut state = self.lock();
            state.response = None;
            state.data = Vec::new();
            state.load_state = LoadState::Loading;
        }
        self.publish();

        let result = self.systems.list_systems(false).await;
        {
            let mut state = self.lock();
            match result {
                Ok(systems) => {
                    tracing::debug!("Landing page loaded {} systems", systems.len());
                    state.data = systems.clone();
                    state.response = Some(Ok(systems));
                    state.load_state = LoadState::Loaded;
                }
                Err(e) => {
                    tracing::warn!("Failed to load systems: {}", e);
                    state.data = Vec::new();
                    state.response = Some(Err(e));
                    state.load_state = LoadState::Failed;
                }
            }
        }
        self.publish();
    }
}

struct Inner {
    shared: Arc<Shared>,
    subscription: Mutex<Option<Subscription>>,
}

impl Inner {
    fn destroy(&self) -> bool {
        let disposed = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some_and(|mut sub| sub.dispose());
        if disposed {
            tracing::info!("Landing page torn down");
        }
        disposed
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Controller for the landing page.
#[derive(Clone)]
pub struct LandingPage {
    inner: Arc<Inner>,
}

impl LandingPage {
    /// Build the controller, subscribe to user changes and start the first load.
    pub fn init(deps: LandingPageDeps) -> Self {
        let LandingPageDeps {
            systems,
            app_state,
            events,
            navigator,
        } = deps;

        let (view_tx, _) = watch::channel(LandingView::default());
        let shared = Arc::new(Shared {
            systems,
            app_state,
            navigator,
            state: Mutex::new(LandingState::default()),
            view_tx,
        });

        let subscription = events.on({
            let shared = shared.clone();
            move |event| {
                let shared = shared.clone();
                async move {
                    match event {
                        AppEvent::UserChanged => {
                            tracing::info!("User changed, reloading systems");
                            shared.load_systems().await;
                        }
                    }
                }
            }
        });

        tokio::spawn({
            let shared = shared.clone();
            async move { shared.load_systems().await }
        });

        Self {
            inner: Arc::new(Inner {
                shared,
                subscription: Mutex::new(Some(subscription)),
            }),
        }
    }

    fn shared(&self) -> &Shared {
        &self.inner.shared
    }

    /// Fetch the ungrouped system list, replacing whatever was shown.
    pub async fn load_systems(&self) {
        self.shared().load_systems().await;
    }

    /// Navigate to a system's detail page and return the path used.
    pub fn explore_system(&self, system: &SystemSummary) -> String {
        let path = self.shared().app_state.build_system_url(&system.id);
        tracing::debug!("Exploring system {} at {}", system.name, path);
        self.shared().navigator.navigate(&path);
        path
    }

    /// Last raw fetch outcome, `None` while loading.
    pub fn response(&self) -> Option<Result<Vec<SystemSummary>, ApiError>> {
        self.shared().lock().response.clone()
    }

    /// Systems currently shown; empty after a failed load.
    pub fn data(&self) -> Vec<SystemSummary> {
        self.shared().lock().data.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.shared().lock().load_state
    }

    /// Current view snapshot.
    pub fn view(&self) -> LandingView {
        self.shared().view_tx.borrow().clone()
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<LandingView> {
        self.shared().view_tx.subscribe()
    }

    /// Drop the user-change subscription. Returns true only the first time.
    pub fn destroy(&self) -> bool {
        self.inner.destroy()
    }
}
