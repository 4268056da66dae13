//! Parsing of a single station-board window.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::trace;

use crate::domain::{Direction, KeyedRecords, StationId, TripId, VehicleVisit, Watermark, parse_clock};
use crate::html::{extract_labels, extract_rows, extract_trip_id, last_table};
use crate::railtime::ScrapeError;

const CONTEXT: &str = "station board";

/// Railtime's "no platform assigned" placeholder.
const NO_PLATFORM: &str = "***";

static WINDOW_REGEX: OnceLock<Regex> = OnceLock::new();

fn window_regex() -> &'static Regex {
    WINDOW_REGEX.get_or_init(|| Regex::new(r"\((\d\d:\d\d) - (\d\d:\d\d)\)").unwrap())
}

/// One fetched board window: the vehicles it lists and how far it reaches.
#[derive(Debug, Clone)]
pub struct BoardWindow {
    /// Upper bound of the displayed time window. The next window is
    /// requested from here.
    pub end_time: Watermark,
    /// Visits keyed by vehicle id, in page order.
    pub visits: KeyedRecords<TripId, VehicleVisit>,
}

/// Parse one board window for `station`, queried on `date` in `direction`.
///
/// Scheduled times are pinned to `date`, the date the window was requested
/// for. Each visit carries only the time for `direction`.
///
/// Row labels are positional:
///
/// | index | content                     |
/// |-------|-----------------------------|
/// | 0     | scheduled time, `H:i`       |
/// | 2     | headsign                    |
/// | 3     | vehicle type, `[IC]`        |
/// | 5     | platform, `***` when absent |
pub fn parse_board_window(
    html: &str,
    station: &StationId,
    date: NaiveDate,
    direction: Direction,
    agency: &str,
) -> Result<BoardWindow, ScrapeError> {
    let end_time = window_regex()
        .captures(html)
        .and_then(|caps| caps.get(2))
        .ok_or_else(|| ScrapeError::parse(CONTEXT, "no time window found"))?;
    let end_time = Watermark::parse(end_time.as_str())
        .map_err(|e| ScrapeError::parse(CONTEXT, e.to_string()))?;

    let mut visits = KeyedRecords::new();
    for row in extract_rows(last_table(html)) {
        let Some(vehicle_id) = extract_trip_id(row) else {
            trace!("Skipping board row without vehicle link");
            continue;
        };

        let labels = extract_labels(row);
        if labels.len() < 4 {
            return Err(ScrapeError::parse(
                CONTEXT,
                format!("vehicle {vehicle_id} row has {} labels", labels.len()),
            ));
        }

        let time = parse_clock(&labels[0], date)
            .map_err(|e| ScrapeError::parse(CONTEXT, format!("vehicle {vehicle_id}: {e}")))?;

        let platform = labels
            .get(5)
            .filter(|p| !p.contains(NO_PLATFORM))
            .map(|p| p.trim().to_string());

        let mut visit = VehicleVisit {
            vehicle_id: vehicle_id.clone(),
            station_id: station.clone(),
            vehicle_type: strip_brackets(&labels[3]).to_string(),
            headsign: labels[2].clone(),
            platform,
            departure_time: None,
            arrival_time: None,
            agency: agency.to_string(),
        };
        visit.set_time(direction, Some(time));

        visits.insert(vehicle_id, visit);
    }

    Ok(BoardWindow { end_time, visits })
}

/// `[IC]` → `IC`. A cancelled train may render `[]`.
fn strip_brackets(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix('[').unwrap_or(s);
    s.strip_suffix(']').unwrap_or(s).trim()
}
