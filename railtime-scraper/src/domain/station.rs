//! Station records.

use serde::{Deserialize, Serialize};

use super::StationId;

/// A Railtime station and every display name it is listed under.
///
/// Belgian stations are often listed under more than one name (e.g.
/// `Brussel-Zuid` and `Bruxelles-Midi`); the first name is the one Railtime
/// expects back in the `sn` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub names: Vec<String>,
}

impl Station {
    /// Create a station with a single name.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            names: vec![name.into()],
        }
    }

    /// The primary display name.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_name_is_first() {
        let mut station = Station::new(StationId::parse("008814001").unwrap(), "Brussel-Zuid");
        station.names.push("Bruxelles-Midi".to_string());

        assert_eq!(station.primary_name(), "Brussel-Zuid");
    }
}
