//! Trips: the full stop sequence of one train on one day.

mod assemble;
mod detail;

pub use assemble::TripAssembler;
pub use detail::{TripDetail, parse_trip_detail};
