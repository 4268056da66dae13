//! Schedule records produced by the page parsers.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Direction, StationId, TripId, yyyymmdd};

/// One vehicle calling at a station, as listed on a station board.
///
/// A single board page carries either the departure or the arrival time;
/// the day assembler fills in the other half from the opposite direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleVisit {
    pub vehicle_id: TripId,
    pub station_id: StationId,
    /// Vehicle category (`IC`, `L`, ...). Blank when Railtime drops it for a
    /// cancelled train.
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub headsign: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveDateTime>,
    pub agency: String,
}

impl VehicleVisit {
    /// The time this visit carries for `direction`.
    pub fn time(&self, direction: Direction) -> Option<NaiveDateTime> {
        match direction {
            Direction::Departure => self.departure_time,
            Direction::Arrival => self.arrival_time,
        }
    }

    /// Set the time for `direction`, leaving every other field untouched.
    pub fn set_time(&mut self, direction: Direction, time: Option<NaiveDateTime>) {
        match direction {
            Direction::Departure => self.departure_time = time,
            Direction::Arrival => self.arrival_time = time,
        }
    }
}

/// One stop of a trip, as listed on a trip-detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopVisit {
    pub trip_id: TripId,
    pub station_id: StationId,
    pub station_name: String,
    /// 1-based position within the trip.
    pub sequence: u32,
    /// A cancelled stop never carries times or delays.
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_delay_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_delay_seconds: Option<i64>,
    /// Name of the trip's final stop; identical on every stop of a trip.
    pub headsign: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    #[serde(with = "yyyymmdd")]
    pub date: NaiveDate,
    pub agency: String,
}

impl StopVisit {
    /// Record a scheduled time and delay for `direction`.
    pub fn set_timing(&mut self, direction: Direction, time: NaiveDateTime, delay_seconds: i64) {
        match direction {
            Direction::Departure => {
                self.departure_time = Some(time);
                self.departure_delay_seconds = Some(delay_seconds);
            }
            Direction::Arrival => {
                self.arrival_time = Some(time);
                self.arrival_delay_seconds = Some(delay_seconds);
            }
        }
    }
}
