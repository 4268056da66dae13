//! Domain types for the Railtime scraper.
//!
//! Identifiers and clock values are validated at construction time, so the
//! parsers and assemblers can pass them around without re-checking.

mod direction;
mod ids;
mod keyed;
mod station;
mod time;
mod visit;

pub use direction::Direction;
pub use ids::{InvalidStationId, InvalidTripId, StationId, TripId};
pub use keyed::KeyedRecords;
pub use station::Station;
pub use time::{
    InvalidServiceDate, TimeError, Watermark, parse_clock, parse_service_date, yyyymmdd,
};
pub use visit::{StopVisit, VehicleVisit};
