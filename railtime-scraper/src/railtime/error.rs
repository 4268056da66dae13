//! Railtime scraping error types.

/// A single page fetch failed. Fetches are never retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Railtime answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// No response is available for this URL (offline fetchers)
    #[error("no response available for {url}")]
    Unavailable { url: String },
}

/// Errors from building a station board or a trip.
///
/// Any of these aborts the whole multi-fetch operation: a partial board or
/// trip would silently under-report the schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// A page fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A page did not have the expected shape (upstream format change)
    #[error("unexpected {context} page: {message}")]
    Parse {
        context: &'static str,
        message: String,
    },

    /// A station id or name is not in the station directory
    #[error("stop not found: {0}")]
    StopNotFound(String),

    /// The configured endpoint could not be turned into a URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

impl ScrapeError {
    pub(crate) fn parse(context: &'static str, message: impl Into<String>) -> Self {
        ScrapeError::Parse {
            context,
            message: message.into(),
        }
    }
}
