//! Location changes requested by controllers.

/// Moves the application to another route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
