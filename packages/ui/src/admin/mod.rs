//! Admin dashboard components for the Beer-Garden UI.

mod alert_banner;
mod pagination;
pub mod pages;
mod sort_header;
mod system_card;

pub use alert_banner::AlertBanner;
pub use pagination::Pagination;
pub use sort_header::SortHeader;
pub use system_card::SystemCard;
