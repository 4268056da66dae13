//! Station name/id directory.

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::Cache;
use crate::domain::{KeyedRecords, Station, StationId};
use crate::html::decode_text;
use crate::railtime::{Fetcher, RailtimeConfig, ScrapeError, search_station_url};

/// Cache key the directory is stored under.
pub const DIRECTORY_CACHE_KEY: &str = "stop_names";

/// How long a fetched directory stays valid: 24 hours.
pub const DIRECTORY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Bidirectional station lookup.
///
/// Maps each station id to its ordered display names, and every display
/// name back to an id. Immutable once built, so it can be shared freely
/// behind an `Arc`.
///
/// When two stations share a display name, the inverted index keeps the
/// station that appears later on the search page (last write wins). The
/// earlier station is still reachable by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Station>", into = "Vec<Station>")]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_id: HashMap<StationId, usize>,
    by_name: HashMap<String, StationId>,
}

impl StationDirectory {
    /// Parse the station search page.
    ///
    /// Every `sid=<digits>&l=<lang>&s=1">name</a>` link contributes one
    /// name; repeated ids accumulate names in page order. Fails if the page
    /// holds no station links at all, which means the format changed.
    pub fn build(raw_html: &str, lang: &str) -> Result<Self, ScrapeError> {
        let pattern = format!(
            r#"(?is)sid=(\d+)&amp;l={}&amp;s=1">(.*?)</a>"#,
            regex::escape(lang)
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| ScrapeError::parse("station search", e.to_string()))?;

        let mut stations: KeyedRecords<StationId, Station> = KeyedRecords::new();
        for caps in regex.captures_iter(raw_html) {
            let (Some(id), Some(name)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let id = StationId::parse(id.as_str())
                .map_err(|e| ScrapeError::parse("station search", e.to_string()))?;
            let name = decode_text(name.as_str());

            match stations.get_mut(&id) {
                Some(station) => station.names.push(name),
                None => stations.insert(id.clone(), Station::new(id, name)),
            }
        }

        if stations.is_empty() {
            return Err(ScrapeError::parse(
                "station search",
                "no station links found",
            ));
        }

        Ok(Self::from_stations(stations.into_values()))
    }

    /// Build the directory from stations in page order.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let mut by_id = HashMap::with_capacity(stations.len());
        let mut by_name = HashMap::new();

        for (i, station) in stations.iter().enumerate() {
            by_id.insert(station.id.clone(), i);
            for name in &station.names {
                by_name.insert(name.clone(), station.id.clone());
            }
        }

        Self {
            stations,
            by_id,
            by_name,
        }
    }

    /// Load the directory from `cache`, or fetch and cache it on a miss.
    pub async fn load_or_fetch<F, C>(
        fetcher: &F,
        cache: &C,
        config: &RailtimeConfig,
    ) -> Result<Self, ScrapeError>
    where
        F: Fetcher,
        C: Cache<StationDirectory>,
    {
        if let Some(directory) = cache.get(DIRECTORY_CACHE_KEY).await {
            debug!(stations = directory.len(), "Station directory loaded from cache");
            return Ok(directory);
        }

        let url = search_station_url(config)?;
        let body = fetcher.fetch(&url).await?;
        let directory = Self::build(&body, &config.language)?;
        info!(stations = directory.len(), "Fetched station directory");

        cache
            .set(DIRECTORY_CACHE_KEY, directory.clone(), DIRECTORY_TTL)
            .await?;

        Ok(directory)
    }

    /// Display names of a station, in page order.
    pub fn names(&self, id: &StationId) -> Option<&[String]> {
        self.get(id).map(|s| s.names.as_slice())
    }

    /// The name Railtime expects in the `sn` parameter for this station.
    pub fn first_name(&self, id: &StationId) -> Option<&str> {
        self.get(id).map(Station::primary_name)
    }

    /// Look up a station by id.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.by_id.get(id).map(|&i| &self.stations[i])
    }

    /// Resolve a display name to a station id.
    pub fn id_for_name(&self, name: &str) -> Option<&StationId> {
        self.by_name.get(name)
    }

    pub fn contains(&self, id: &StationId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get the number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations in page order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }
}

impl From<Vec<Station>> for StationDirectory {
    fn from(stations: Vec<Station>) -> Self {
        Self::from_stations(stations)
    }
}

impl From<StationDirectory> for Vec<Station> {
    fn from(directory: StationDirectory) -> Self {
        directory.stations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryCache, MemoryCacheConfig};
    use crate::railtime::MockFetcher;
    use crate::testdata;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    #[test]
    fn build_collects_names_per_id() {
        let directory = StationDirectory::build(&testdata::search_page(), "NL").unwrap();

        assert_eq!(
            directory.names(&sid("008814001")).unwrap(),
            &["Brussel-Zuid".to_string(), "Bruxelles-Midi".to_string()]
        );
        assert_eq!(directory.first_name(&sid("008814001")), Some("Brussel-Zuid"));
        assert_eq!(directory.len(), testdata::SEARCH_PAGE_STATIONS);
    }

    #[test]
    fn build_decodes_entities() {
        let directory = StationDirectory::build(&testdata::search_page(), "NL").unwrap();

        assert_eq!(
            directory.id_for_name("Liège-Guillemins"),
            Some(&sid("008841004"))
        );
    }

    #[test]
    fn build_ignores_other_languages() {
        let html = r#"<a href="x?sid=1&amp;l=FR&amp;s=1">Un</a><a href="x?sid=2&amp;l=NL&amp;s=1">Twee</a>"#;
        let directory = StationDirectory::build(html, "NL").unwrap();

        assert_eq!(directory.len(), 1);
        assert!(directory.contains(&sid("2")));
        assert!(!directory.contains(&sid("1")));
    }

    #[test]
    fn build_fails_without_links() {
        let err = StationDirectory::build("<html><body>Onderhoud</body></html>", "NL");
        assert!(matches!(err, Err(ScrapeError::Parse { .. })));
    }

    #[test]
    fn colliding_names_keep_last_writer() {
        let html = r#"
            <a href="x?sid=100&amp;l=NL&amp;s=1">Haven</a>
            <a href="x?sid=200&amp;l=NL&amp;s=1">Haven</a>"#;
        let directory = StationDirectory::build(html, "NL").unwrap();

        assert_eq!(directory.id_for_name("Haven"), Some(&sid("200")));
        assert_eq!(directory.names(&sid("100")).unwrap(), &["Haven".to_string()]);
    }

    #[test]
    fn serde_rebuilds_indexes() {
        let directory = StationDirectory::build(&testdata::search_page(), "NL").unwrap();

        let json = serde_json::to_string(&directory).unwrap();
        let back: StationDirectory = serde_json::from_str(&json).unwrap();

        assert_eq!(back, directory);
        assert_eq!(back.id_for_name("Bruxelles-Midi"), Some(&sid("008814001")));
    }

    #[tokio::test]
    async fn load_or_fetch_uses_cache_after_first_fetch() {
        let config = RailtimeConfig::new();
        let fetcher = MockFetcher::new()
            .with_page(search_station_url(&config).unwrap(), testdata::search_page());
        let cache = MemoryCache::new(&MemoryCacheConfig::default());

        let first = StationDirectory::load_or_fetch(&fetcher, &cache, &config)
            .await
            .unwrap();
        let second = StationDirectory::load_or_fetch(&fetcher, &cache, &config)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn load_or_fetch_propagates_fetch_failure() {
        let config = RailtimeConfig::new();
        let fetcher = MockFetcher::new();
        let cache = MemoryCache::new(&MemoryCacheConfig::default());

        let result = StationDirectory::load_or_fetch(&fetcher, &cache, &config).await;
        assert!(matches!(result, Err(ScrapeError::Fetch(_))));
        assert!(cache.get(DIRECTORY_CACHE_KEY).await.is_none());
    }
}
