//! Mock fetcher for running the scraper without network access.
//!
//! Serves canned page bodies keyed by exact URL and records every request,
//! so tests can assert both on results and on the sequence of fetches.

use std::collections::HashMap;
use std::sync::Mutex;

use super::client::Fetcher;
use super::error::FetchError;

/// Fetcher that serves pre-loaded bodies.
///
/// Unknown URLs fail with [`FetchError::Unavailable`], which exercises the
/// same abort path a network failure would.
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body served for `url`.
    pub fn add_page(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(url.into(), body.into());
    }

    /// Builder-style variant of [`MockFetcher::add_page`].
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_page(url, body);
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of fetches issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Unavailable {
                url: url.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_pages() {
        let fetcher = MockFetcher::new().with_page("http://a.test/x", "<html>x</html>");

        let body = fetcher.fetch("http://a.test/x").await.unwrap();
        assert_eq!(body, "<html>x</html>");
        assert_eq!(fetcher.requests(), vec!["http://a.test/x".to_string()]);
    }

    #[tokio::test]
    async fn unknown_url_fails() {
        let fetcher = MockFetcher::new();

        let result = fetcher.fetch("http://a.test/missing").await;
        assert!(matches!(result, Err(FetchError::Unavailable { .. })));
        assert_eq!(fetcher.request_count(), 1);
    }
}
