//! REST access to the Beer-Garden backend.
//!
//! This crate contains the service seams the dashboard controllers depend on:
//! - `QueueService` for listing and clearing message queues
//! - `SystemService` for listing registered systems
//! - `BeerGardenClient`, the HTTP implementation of both

mod client;
pub mod config;
mod error;
mod queues;
mod systems;

pub use client::BeerGardenClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use queues::QueueService;
pub use systems::SystemService;

// Re-export core types for convenience
pub use garden_core::{QueueRow, SystemId, SystemSummary};
