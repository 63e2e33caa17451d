//! Core view-model types for the Beer-Garden admin dashboard.
//!
//! This crate contains shared types used across all packages:
//! - QueueRow for backend-reported message queues
//! - SystemSummary for registered systems
//! - Alert and AlertList for dismissible notifications
//! - AppEvent for application-wide notifications

mod alert;
mod events;
mod queue;
mod system;

pub use alert::{Alert, AlertId, AlertKind, AlertList};
pub use events::AppEvent;
pub use queue::{LoadState, QueueRow};
pub use system::{InstanceSummary, SystemId, SystemSummary};
