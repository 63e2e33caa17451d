//! Queue management endpoints.

use async_trait::async_trait;
use garden_core::QueueRow;

use crate::{ApiError, BeerGardenClient};

/// Listing and clearing of message queues.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// List every queue across all systems.
    async fn list_queues(&self) -> Result<Vec<QueueRow>, ApiError>;

    /// Drop all messages from the named queue.
    async fn clear_queue(&self, name: &str) -> Result<(), ApiError>;

    /// Drop all messages from every queue.
    async fn clear_all_queues(&self) -> Result<(), ApiError>;
}

#[async_trait]
impl QueueService for BeerGardenClient {
    async fn list_queues(&self) -> Result<Vec<QueueRow>, ApiError> {
        let url = self.endpoint(&["api", "v1", "queues", ""])?;
        let queues: Vec<QueueRow> = self.get_json(url, &[]).await?;
        tracing::debug!("Fetched {} queues", queues.len());
        Ok(queues)
    }

    async fn clear_queue(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "v1", "queues", name])?;
        self.delete(url).await
    }

    async fn clear_all_queues(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "v1", "queues", ""])?;
        self.delete(url).await
    }
}
