//! Routed admin pages.

mod landing_page;
mod queues_page;

pub use landing_page::LandingPage;
pub use queues_page::QueuesPage;
