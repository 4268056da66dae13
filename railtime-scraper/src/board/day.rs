//! Whole-day station boards.
//!
//! Railtime shows a station board a short window at a time. A day is
//! assembled by walking windows from 04:15 until 01:15 the next morning,
//! each request starting at the previous window's end, once per direction.
//! The two directions are then merged by vehicle id.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::{Direction, KeyedRecords, StationId, TripId, VehicleVisit};
use crate::railtime::{Fetcher, RailtimeConfig, ScrapeError, station_board_url};
use crate::stations::StationDirectory;

use super::window::parse_board_window;

/// Drives board-window fetches across a service day.
pub struct DayBoardAssembler<'a, F> {
    fetcher: &'a F,
    directory: &'a StationDirectory,
    config: &'a RailtimeConfig,
}

impl<'a, F: Fetcher> DayBoardAssembler<'a, F> {
    pub fn new(fetcher: &'a F, directory: &'a StationDirectory, config: &'a RailtimeConfig) -> Self {
        Self {
            fetcher,
            directory,
            config,
        }
    }

    /// Every vehicle calling at `station` during the service day `date`.
    ///
    /// Vehicles seen in both directions carry both a departure and an
    /// arrival time; vehicles seen in one direction keep that partial record.
    /// Any failed fetch or unparseable window fails the whole day.
    pub async fn build_day(
        &self,
        station: &StationId,
        date: NaiveDate,
    ) -> Result<Vec<VehicleVisit>, ScrapeError> {
        let station_name = self
            .directory
            .first_name(station)
            .ok_or_else(|| ScrapeError::StopNotFound(station.to_string()))?;

        let departures = self
            .walk_direction(station, station_name, date, Direction::Departure)
            .await?;
        let arrivals = self
            .walk_direction(station, station_name, date, Direction::Arrival)
            .await?;

        let visits = merge_directions(departures, arrivals);
        info!(
            station = %station,
            %date,
            vehicles = visits.len(),
            "Assembled station board"
        );
        Ok(visits)
    }

    /// Page through one direction's windows for the day.
    async fn walk_direction(
        &self,
        station: &StationId,
        station_name: &str,
        date: NaiveDate,
        direction: Direction,
    ) -> Result<KeyedRecords<TripId, VehicleVisit>, ScrapeError> {
        let ceiling = date.and_time(self.config.first_window.time()) + self.config.window_span;

        let mut day = date;
        let mut watermark = self.config.first_window.clone();
        let mut visits: KeyedRecords<TripId, VehicleVisit> = KeyedRecords::new();

        while day.and_time(watermark.time()) < ceiling {
            let url = station_board_url(self.config, station, station_name, day, &watermark, direction)?;
            let body = self.fetcher.fetch(&url).await?;
            let window = parse_board_window(&body, station, day, direction, &self.config.agency)?;

            debug!(
                station = %station,
                %direction,
                %day,
                watermark = %watermark,
                end = %window.end_time,
                vehicles = window.visits.len(),
                "Fetched board window"
            );

            // Lexical HH:MM comparison: an end time "before" the watermark
            // means the window ran past midnight.
            if window.end_time < watermark {
                day = day.succ_opt().ok_or_else(|| {
                    ScrapeError::parse("station board", format!("date overflow after {day}"))
                })?;
                debug!(%direction, %day, "Board wrapped past midnight");
            } else if window.end_time == watermark {
                return Err(ScrapeError::parse(
                    "station board",
                    format!("window at {watermark} did not advance"),
                ));
            }
            watermark = window.end_time;

            for visit in window.visits.into_values() {
                match visits.get_mut(&visit.vehicle_id) {
                    Some(known) => known.set_time(direction, visit.time(direction)),
                    None => visits.insert(visit.vehicle_id.clone(), visit),
                }
            }
        }

        Ok(visits)
    }
}

/// Layer arrival times onto the departure records.
///
/// Departure sightings keep every other field; vehicles only seen arriving
/// are appended as-is.
fn merge_directions(
    mut departures: KeyedRecords<TripId, VehicleVisit>,
    arrivals: KeyedRecords<TripId, VehicleVisit>,
) -> Vec<VehicleVisit> {
    for arrival in arrivals.into_values() {
        match departures.get_mut(&arrival.vehicle_id) {
            Some(visit) => visit.arrival_time = arrival.arrival_time,
            None => departures.insert(arrival.vehicle_id.clone(), arrival),
        }
    }
    departures.into_values()
}
