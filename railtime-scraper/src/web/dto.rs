//! Response bodies that are not domain records.

use serde::Serialize;

use crate::domain::Station;

/// One station with all its display names.
#[derive(Debug, Serialize)]
pub struct StationResponse {
    pub id: String,
    pub names: Vec<String>,
}

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            names: station.names.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResponse>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
