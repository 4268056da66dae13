use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use railtime_scraper::railtime::{HttpFetcher, RailtimeConfig};
use railtime_scraper::scraper::RailtimeScraper;
use railtime_scraper::stations::{DiskCache, DiskCacheConfig};
use railtime_scraper::web::{AppState, create_router};

const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// How often the directory cache is re-consulted. An entry older than
/// `DIRECTORY_TTL` is refetched on the next pass.
const DIRECTORY_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("railtime_scraper=info")),
        )
        .init();

    let mut config = RailtimeConfig::new();
    if let Ok(base_url) = std::env::var("RAILTIME_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Ok(language) = std::env::var("RAILTIME_LANG") {
        config = config.with_language(language);
    }

    let cache_config = match std::env::var("RAILTIME_CACHE_PATH") {
        Ok(dir) => DiskCacheConfig::new(dir),
        Err(_) => DiskCacheConfig::default(),
    };
    let cache = DiskCache::new(cache_config);

    // Fail fast: boards and trips are useless without the directory
    let fetcher = HttpFetcher::new(&config)?;
    let scraper = Arc::new(RailtimeScraper::connect(fetcher, &cache, config).await?);
    let stations = scraper.directory().await.len();
    info!(stations, "Station directory ready");

    let refresher = Arc::clone(&scraper);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(DIRECTORY_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresher.refresh(&cache).await {
                Ok(count) => debug!(stations = count, "Station directory refreshed"),
                Err(e) => warn!(error = %e, "Station directory refresh failed, keeping current"),
            }
        }
    });

    let app = create_router(AppState::new(scraper));

    let bind = std::env::var("RAILTIME_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %listener.local_addr()?, "Railtime scraper listening");

    axum::serve(listener, app).await?;
    Ok(())
}
