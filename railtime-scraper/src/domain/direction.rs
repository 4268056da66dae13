//! Departure/arrival direction of a Railtime page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a page reports departure (`D`) or arrival (`A`) times.
///
/// Railtime reports a single direction per fetch, so every board and trip
/// is scraped twice and the halves are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "D")]
    Departure,
    #[serde(rename = "A")]
    Arrival,
}

impl Direction {
    /// Both directions in the order they are scraped.
    pub const ALL: [Direction; 2] = [Direction::Departure, Direction::Arrival];

    /// The `da` query parameter value.
    pub fn code(self) -> &'static str {
        match self {
            Direction::Departure => "D",
            Direction::Arrival => "A",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
