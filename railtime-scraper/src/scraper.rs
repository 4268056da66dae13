//! Entry point tying the station directory to boards and trips.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::board::DayBoardAssembler;
use crate::cache::Cache;
use crate::domain::{StationId, StopVisit, TripId, VehicleVisit};
use crate::railtime::{Fetcher, RailtimeConfig, ScrapeError};
use crate::stations::StationDirectory;
use crate::trip::TripAssembler;

/// Railtime scraper for one deployment.
///
/// Every board or trip request fetches its pages fresh and works against a
/// snapshot of the station directory. [`RailtimeScraper::refresh`] swaps in
/// a new directory once the cached one has expired.
pub struct RailtimeScraper<F> {
    fetcher: F,
    directory: RwLock<Arc<StationDirectory>>,
    config: RailtimeConfig,
}

impl<F: Fetcher> RailtimeScraper<F> {
    pub fn new(fetcher: F, directory: StationDirectory, config: RailtimeConfig) -> Self {
        Self {
            fetcher,
            directory: RwLock::new(Arc::new(directory)),
            config,
        }
    }

    /// Build a scraper, taking the station directory from `cache` when it
    /// holds a fresh copy and fetching it otherwise.
    pub async fn connect<C>(fetcher: F, cache: &C, config: RailtimeConfig) -> Result<Self, ScrapeError>
    where
        C: Cache<StationDirectory>,
    {
        let directory = StationDirectory::load_or_fetch(&fetcher, cache, &config).await?;
        Ok(Self::new(fetcher, directory, config))
    }

    /// The current station directory.
    pub async fn directory(&self) -> Arc<StationDirectory> {
        Arc::clone(&*self.directory.read().await)
    }

    /// Reload the station directory through `cache`.
    ///
    /// A fresh cache entry is reused; an expired one is refetched from
    /// Railtime. On failure the current directory is kept and the error is
    /// returned.
    pub async fn refresh<C>(&self, cache: &C) -> Result<usize, ScrapeError>
    where
        C: Cache<StationDirectory>,
    {
        let directory = StationDirectory::load_or_fetch(&self.fetcher, cache, &self.config).await?;
        let count = directory.len();

        let mut guard = self.directory.write().await;
        *guard = Arc::new(directory);

        Ok(count)
    }

    /// Every vehicle calling at `station` on `date`.
    pub async fn get_stop(
        &self,
        station: &StationId,
        date: NaiveDate,
    ) -> Result<Vec<VehicleVisit>, ScrapeError> {
        let directory = self.directory().await;
        DayBoardAssembler::new(&self.fetcher, &directory, &self.config)
            .build_day(station, date)
            .await
    }

    /// Every stop of `trip` on `date`.
    pub async fn get_trip(&self, trip: &TripId, date: NaiveDate) -> Result<Vec<StopVisit>, ScrapeError> {
        let directory = self.directory().await;
        TripAssembler::new(&self.fetcher, &directory, &self.config)
            .build_trip(trip, date)
            .await
    }
}
