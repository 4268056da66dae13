//! Railtime HTTP fetching.
//!
//! The scraper only ever issues plain GETs against the mobile HTML site and
//! reads the body back as text.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveTime;
use tracing::debug;

use crate::domain::Watermark;

use super::error::FetchError;

/// Default base URL for the Railtime mobile site.
const DEFAULT_BASE_URL: &str = "http://www.railtime.be/mobile/HTML";

/// Language Railtime pages are requested in. The "no data" phrases the trip
/// parser recognizes are the Dutch ones.
const DEFAULT_LANGUAGE: &str = "NL";

/// Operator identifier stamped on every record.
const DEFAULT_AGENCY: &str = "NMBS-SNCB";

/// First board window of a service day.
const FIRST_WINDOW: NaiveTime = match NaiveTime::from_hms_opt(4, 15, 0) {
    Some(t) => t,
    None => panic!("invalid first window"),
};

/// Boards are paged from 04:15 until 01:15 the next day.
const WINDOW_SPAN_HOURS: i64 = 21;

/// Configuration for scraping Railtime.
#[derive(Debug, Clone)]
pub struct RailtimeConfig {
    /// Base URL of the mobile HTML site
    pub base_url: String,
    /// `l` query parameter
    pub language: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Agency identifier stamped on records
    pub agency: String,
    /// Watermark of the first board window of a day
    pub first_window: Watermark,
    /// How far past `first_window` boards are paged
    pub window_span: chrono::Duration,
}

impl RailtimeConfig {
    /// Create a config pointing at the production site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: 30,
            user_agent: concat!("railtime-scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            agency: DEFAULT_AGENCY.to_string(),
            first_window: Watermark::from_time(FIRST_WINDOW),
            window_span: chrono::Duration::hours(WINDOW_SPAN_HOURS),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the page language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the agency identifier.
    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }
}

impl Default for RailtimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Retrieves raw page bodies.
///
/// Called exactly once per logical sub-request; implementations must not
/// retry or cache.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with the given configuration.
    pub fn new(config: &RailtimeConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = RailtimeConfig::new()
            .with_base_url("http://localhost:8080")
            .with_language("FR")
            .with_timeout(60)
            .with_agency("SNCB");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.language, "FR");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.agency, "SNCB");
    }

    #[test]
    fn config_defaults() {
        let config = RailtimeConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, "NL");
        assert_eq!(config.agency, "NMBS-SNCB");
        assert_eq!(config.first_window.as_str(), "04:15");
        assert_eq!(config.window_span, chrono::Duration::hours(21));
    }

    #[test]
    fn client_creation() {
        let client = HttpFetcher::new(&RailtimeConfig::new());
        assert!(client.is_ok());
    }
}
