//! System listing endpoint.

use async_trait::async_trait;
use garden_core::SystemSummary;

use crate::{ApiError, BeerGardenClient};

/// Read access to registered systems.
#[async_trait]
pub trait SystemService: Send + Sync {
    /// List registered systems. `grouped` asks the backend to group
    /// versions of the same system together.
    async fn list_systems(&self, grouped: bool) -> Result<Vec<SystemSummary>, ApiError>;
}

#[async_trait]
impl SystemService for BeerGardenClient {
    async fn list_systems(&self, grouped: bool) -> Result<Vec<SystemSummary>, ApiError> {
        let url = self.endpoint(&["api", "v1", "systems", ""])?;
        let systems: Vec<SystemSummary> =
            self.get_json(url, &[("grouped", grouped.to_string())]).await?;
        tracing::debug!("Fetched {} systems", systems.len());
        Ok(systems)
    }
}
