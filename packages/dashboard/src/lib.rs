//! View controllers for the Beer-Garden admin dashboard.
//!
//! The controllers here are free of any UI framework; they own view state
//! and publish snapshots that a renderer subscribes to.
//!
//! # Architecture
//!
//! - `QueueDashboard` - Queue table with clear actions and a poll timer
//! - `LandingPage` - Registered systems with navigation to their detail page
//! - `TableParams` - Pull-based, sortable, paginated table model
//! - `AppState` - Read-only view of the application-wide system registry
//! - `EventBus` - Broadcast of application events with disposable subscriptions
//! - `Scheduler` / `PollTimer` - Cancelable periodic ticks
//!
//! # Usage
//!
//! ```ignore
//! use dashboard::{QueueDashboard, QueueDashboardDeps};
//!
//! let queues = QueueDashboard::init(deps);
//! queues.reload().await;
//! queues.clear_queue("echo.1-0-0.default").await;
//! queues.destroy();
//! ```

pub mod app_state;
mod config;
mod events;
mod landing;
mod navigator;
mod queues;
mod table;
mod timer;

pub use app_state::{AppState, ReadySignal, ReadyTrigger, SharedAppState, compare_versions};
pub use config::DashboardConfig;
pub use events::{EventBus, Subscription};
pub use landing::{LandingPage, LandingPageDeps, LandingView};
pub use navigator::Navigator;
pub use queues::{
    QueueDashboard, QueueDashboardDeps, QueueDashboardView, QueueRowView, SystemLink, link_label,
    queue_columns, row_view,
};
pub use table::{Column, DataSource, Sort, SortDirection, TableParams};
pub use timer::{PollTimer, Scheduler, TickFn, TimerHandle, TokioScheduler};
