//! Full trips from the departure and arrival trip pages.

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{Direction, StopVisit, TripId};
use crate::railtime::{Fetcher, RailtimeConfig, ScrapeError, trip_detail_url};
use crate::stations::StationDirectory;

use super::detail::{TripDetail, parse_trip_detail};

/// Combines both directions of a trip into one record per stop.
pub struct TripAssembler<'a, F> {
    fetcher: &'a F,
    directory: &'a StationDirectory,
    config: &'a RailtimeConfig,
}

impl<'a, F: Fetcher> TripAssembler<'a, F> {
    pub fn new(fetcher: &'a F, directory: &'a StationDirectory, config: &'a RailtimeConfig) -> Self {
        Self {
            fetcher,
            directory,
            config,
        }
    }

    /// All stops of `trip` on `date`, ordered by sequence.
    ///
    /// The departure page defines which stops exist and in what order; the
    /// arrival page only contributes arrival times. An empty result means
    /// Railtime has no data for this trip on this date.
    pub async fn build_trip(
        &self,
        trip: &TripId,
        date: NaiveDate,
    ) -> Result<Vec<StopVisit>, ScrapeError> {
        let departures = self.fetch_direction(trip, date, Direction::Departure).await?;
        let arrivals = self.fetch_direction(trip, date, Direction::Arrival).await?;

        let (mut stops, arrivals) = match (departures, arrivals) {
            (TripDetail::Stops(d), TripDetail::Stops(a)) => (d, a),
            _ => return Ok(Vec::new()),
        };

        for arrival in arrivals.values() {
            let Some(stop) = stops.get_mut(&arrival.station_id) else {
                continue;
            };
            if arrival.arrival_time.is_some() {
                stop.arrival_time = arrival.arrival_time;
                stop.arrival_delay_seconds = arrival.arrival_delay_seconds;
            }
        }

        // A cancelled train's departure page may lack the type
        let arrival_type = arrivals
            .values()
            .map(|a| a.vehicle_type.as_str())
            .find(|t| !t.is_empty());
        if let Some(vehicle_type) = arrival_type {
            for stop in stops.values_mut().filter(|s| s.vehicle_type.is_empty()) {
                stop.vehicle_type = vehicle_type.to_string();
            }
        }

        let mut stops = stops.into_values();
        stops.sort_by_key(|s| s.sequence);
        info!(trip = %trip, %date, stops = stops.len(), "Assembled trip");
        Ok(stops)
    }

    async fn fetch_direction(
        &self,
        trip: &TripId,
        date: NaiveDate,
        direction: Direction,
    ) -> Result<TripDetail, ScrapeError> {
        let url = trip_detail_url(self.config, trip, date, direction)?;
        let body = self.fetcher.fetch(&url).await?;
        parse_trip_detail(&body, trip, date, direction, self.directory, &self.config.agency)
    }
}
