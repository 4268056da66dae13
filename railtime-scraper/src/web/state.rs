//! Application state for the web layer.

use std::sync::Arc;

use crate::scraper::RailtimeScraper;

/// Shared application state.
pub struct AppState<F> {
    pub scraper: Arc<RailtimeScraper<F>>,
}

impl<F> AppState<F> {
    /// Wrap a scraper that may also be shared with a refresh task.
    pub fn new(scraper: Arc<RailtimeScraper<F>>) -> Self {
        Self { scraper }
    }
}

// Derived Clone would require `F: Clone`
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            scraper: Arc::clone(&self.scraper),
        }
    }
}
