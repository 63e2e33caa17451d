//! Services shared with every page through the Dioxus context.

use std::sync::Arc;

use api::{ApiError, BeerGardenClient};
use dashboard::{
    DashboardConfig, EventBus, LandingPageDeps, Navigator, QueueDashboardDeps, SharedAppState,
    TokioScheduler,
};

/// Backend client, system registry and event bus for the running app.
#[derive(Clone)]
pub struct AppServices {
    pub client: Arc<BeerGardenClient>,
    pub app_state: Arc<SharedAppState>,
    pub events: EventBus,
    pub config: DashboardConfig,
}

impl AppServices {
    pub fn new(client: BeerGardenClient, config: DashboardConfig) -> Self {
        Self {
            client: Arc::new(client),
            app_state: Arc::new(SharedAppState::new()),
            events: EventBus::new(),
            config,
        }
    }

    pub fn queue_deps(&self) -> QueueDashboardDeps {
        QueueDashboardDeps {
            queues: self.client.clone(),
            app_state: self.app_state.clone(),
            events: self.events.clone(),
            scheduler: Arc::new(TokioScheduler),
            config: self.config.clone(),
        }
    }

    pub fn landing_deps(&self, navigator: Arc<dyn Navigator>) -> LandingPageDeps {
        LandingPageDeps {
            systems: self.client.clone(),
            app_state: self.app_state.clone(),
            events: self.events.clone(),
            navigator,
        }
    }

    /// Reload the system registry, resolving the ready signal either way.
    pub async fn refresh_systems(&self) -> Result<usize, ApiError> {
        self.app_state.refresh(self.client.as_ref()).await
    }
}
