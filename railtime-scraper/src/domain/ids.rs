//! Railtime identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// Error returned when parsing an invalid trip id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip id: {reason}")]
pub struct InvalidTripId {
    reason: &'static str,
}

/// Railtime ids are non-empty runs of ASCII digits. Leading zeros are
/// significant (`008821006` and `8821006` are different ids).
fn check_digits(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("must not be empty");
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("must contain only ASCII digits");
    }
    Ok(())
}

/// A station identifier assigned by Railtime (the `sid` query parameter).
///
/// # Examples
///
/// ```
/// use railtime_scraper::domain::StationId;
///
/// let sid = StationId::parse("008821006").unwrap();
/// assert_eq!(sid.as_str(), "008821006");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("88a").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id from its textual form.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        check_digits(s).map_err(|reason| InvalidStationId { reason })?;
        Ok(StationId(s.to_string()))
    }

    /// Returns the station id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        check_digits(&s).map_err(|reason| InvalidStationId { reason })?;
        Ok(StationId(s))
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A trip (vehicle run) identifier assigned by Railtime (the `tid` query
/// parameter). Board pages call this the vehicle id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TripId(String);

impl TripId {
    /// Parse a trip id from its textual form.
    pub fn parse(s: &str) -> Result<Self, InvalidTripId> {
        check_digits(s).map_err(|reason| InvalidTripId { reason })?;
        Ok(TripId(s.to_string()))
    }

    /// Returns the trip id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TripId {
    type Error = InvalidTripId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        check_digits(&s).map_err(|reason| InvalidTripId { reason })?;
        Ok(TripId(s))
    }
}

impl From<TripId> for String {
    fn from(id: TripId) -> Self {
        id.0
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_id_keeps_leading_zeros() {
        let sid = StationId::parse("008821006").unwrap();
        assert_eq!(sid.as_str(), "008821006");
        assert_ne!(sid, StationId::parse("8821006").unwrap());
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
        assert!(TripId::parse("").is_err());
    }

    #[test]
    fn reject_non_digits() {
        assert!(StationId::parse("88 21").is_err());
        assert!(StationId::parse("BE.NMBS.1").is_err());
        assert!(TripId::parse("IC1234").is_err());
        assert!(TripId::parse("-1").is_err());
    }

    #[test]
    fn display_and_debug() {
        let tid = TripId::parse("1234").unwrap();
        assert_eq!(format!("{}", tid), "1234");
        assert_eq!(format!("{:?}", tid), "TripId(1234)");

        let sid = StationId::parse("42").unwrap();
        assert_eq!(format!("{:?}", sid), "StationId(42)");
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let sid: StationId = serde_json::from_str("\"008821006\"").unwrap();
        assert_eq!(sid.as_str(), "008821006");
        assert_eq!(serde_json::to_string(&sid).unwrap(), "\"008821006\"");

        assert!(serde_json::from_str::<TripId>("\"abc\"").is_err());
    }
}
