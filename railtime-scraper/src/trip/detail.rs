//! Parsing of a single trip-detail page.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::domain::{Direction, KeyedRecords, StationId, StopVisit, TripId, parse_clock};
use crate::html::{extract_labels, extract_rows, extract_station_anchor};
use crate::railtime::ScrapeError;
use crate::stations::StationDirectory;

const CONTEXT: &str = "trip detail";

/// Phrases Railtime shows instead of a trip: data retired, and no such
/// train on the requested date. Both are normal outcomes. Trip pages are
/// always requested with `l=NL`, so only the Dutch wording appears.
const NO_DATA_PHRASES: [&str; 2] = [
    "Deze gegevens zijn niet langer beschikbaar.",
    "Deze trein bestaat niet voor de gevraagde datum.",
];

/// Style class marking a stop the train no longer calls at.
const CANCELLED_MARKER: &str = "TrainDeleted";

static TYPE_REGEX: OnceLock<Regex> = OnceLock::new();

/// `[IC 1234]`, `[P 7512]`; the type part is dropped for cancelled trains.
fn type_regex() -> &'static Regex {
    TYPE_REGEX.get_or_init(|| Regex::new(r"(?i)\[([A-Z, ]*[A-Z,]*)? *\d+\]").unwrap())
}

/// Result of parsing one direction of a trip.
#[derive(Debug, Clone)]
pub enum TripDetail {
    /// Railtime has no data for this trip on this date.
    NoData,
    /// Stops keyed by station id, in trip order.
    Stops(KeyedRecords<StationId, StopVisit>),
}

/// Parse one direction of trip `trip` on `date`.
///
/// Stops rendered without a station link (terminal stops) are resolved by
/// name through `directory`. Every stop gets the last stop's name as
/// headsign.
pub fn parse_trip_detail(
    html: &str,
    trip: &TripId,
    date: NaiveDate,
    direction: Direction,
    directory: &StationDirectory,
    agency: &str,
) -> Result<TripDetail, ScrapeError> {
    if NO_DATA_PHRASES.iter().any(|phrase| html.contains(phrase)) {
        debug!(trip = %trip, %date, %direction, "No trip data available");
        return Ok(TripDetail::NoData);
    }

    let vehicle_type = type_regex()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let mut stops: KeyedRecords<StationId, StopVisit> = KeyedRecords::new();
    let mut headsign = None;

    for row in extract_rows(html) {
        let mut labels = extract_labels(row);

        let (station_id, station_name) = if labels.len() == 3 {
            // Terminal stop: name, time, delay
            let name = labels.remove(0);
            let id = directory
                .id_for_name(&name)
                .cloned()
                .ok_or_else(|| ScrapeError::StopNotFound(name.clone()))?;
            (id, name)
        } else {
            let anchor = extract_station_anchor(row).ok_or_else(|| {
                ScrapeError::parse(CONTEXT, format!("trip {trip}: stop row without station link"))
            })?;
            (anchor.id, anchor.name)
        };

        let mut stop = StopVisit {
            trip_id: trip.clone(),
            station_id: station_id.clone(),
            station_name: station_name.clone(),
            sequence: stops.len() as u32 + 1,
            cancelled: false,
            departure_time: None,
            departure_delay_seconds: None,
            arrival_time: None,
            arrival_delay_seconds: None,
            headsign: String::new(),
            vehicle_type: vehicle_type.clone(),
            date,
            agency: agency.to_string(),
        };

        if row.contains(CANCELLED_MARKER) {
            stop.cancelled = true;
        } else {
            let time = labels
                .first()
                .ok_or_else(|| {
                    ScrapeError::parse(CONTEXT, format!("trip {trip}: no time at {station_name}"))
                })
                .and_then(|label| {
                    parse_clock(label, date).map_err(|e| {
                        ScrapeError::parse(CONTEXT, format!("trip {trip} at {station_name}: {e}"))
                    })
                })?;
            let delay_minutes = labels.get(1).map_or(0, |label| parse_delay_minutes(label));
            stop.set_timing(direction, time, delay_minutes * 60);
        }

        headsign = Some(station_name);
        stops.insert(station_id, stop);
    }

    if let Some(headsign) = headsign {
        for stop in stops.values_mut() {
            stop.headsign.clone_from(&headsign);
        }
    }

    Ok(TripDetail::Stops(stops))
}

/// Leading signed integer of a delay label (`+5`, `-1`, `12'`); anything
/// else, including an empty label for an on-time stop, is zero.
fn parse_delay_minutes(label: &str) -> i64 {
    let label = label.trim();
    let (sign, digits) = match label.as_bytes().first() {
        Some(b'-') => (-1, &label[1..]),
        Some(b'+') => (1, &label[1..]),
        _ => (1, label),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}
