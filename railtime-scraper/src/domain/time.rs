//! Clock and date handling for Railtime pages.
//!
//! Railtime renders times as bare `H:i` strings with no date attached. The
//! date always comes from the query that produced the page, never from the
//! wall clock of the process doing the scraping.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Error returned when parsing an invalid `YYYYMMDD` service date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service date {input:?}: expected YYYYMMDD")]
pub struct InvalidServiceDate {
    input: String,
}

/// Parse a `YYYYMMDD` service date.
///
/// # Examples
///
/// ```
/// use railtime_scraper::domain::parse_service_date;
/// use chrono::NaiveDate;
///
/// let date = parse_service_date("20120101").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2012, 1, 1).unwrap());
///
/// assert!(parse_service_date("2012-01-01").is_err());
/// assert!(parse_service_date("20121301").is_err());
/// ```
pub fn parse_service_date(s: &str) -> Result<NaiveDate, InvalidServiceDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidServiceDate {
            input: s.to_string(),
        });
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|_| InvalidServiceDate {
        input: s.to_string(),
    })
}

/// Parse a Railtime `H:i` clock label and pin it to `date`.
///
/// Hours may be one or two digits (`4:30` and `04:30` are both accepted);
/// surrounding whitespace is ignored.
pub fn parse_clock(s: &str, date: NaiveDate) -> Result<NaiveDateTime, TimeError> {
    let (hour, minute) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| TimeError::new("expected H:MM format"))?;

    let hour = parse_small_number(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_small_number(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    let time =
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))?;
    Ok(date.and_time(time))
}

/// Parse one or two ASCII digits.
fn parse_small_number(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// A zero-padded `HH:MM` time-of-day boundary used while paging a station
/// board.
///
/// Ordering is **lexical string ordering** of the `HH:MM` text, not a
/// duration comparison. Day-wrap detection relies on exactly this: a window
/// ending at `00:05` after a watermark of `23:50` compares as smaller.
///
/// # Examples
///
/// ```
/// use railtime_scraper::domain::Watermark;
///
/// let late = Watermark::parse("23:50").unwrap();
/// let wrapped = Watermark::parse("00:05").unwrap();
/// assert!(wrapped < late);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Watermark(String);

impl Watermark {
    /// Parse a strict `HH:MM` watermark.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }
        // Validates ranges; the text itself is what gets compared.
        parse_clock(s, NaiveDate::MIN)?;
        Ok(Self(s.to_string()))
    }

    /// Build a watermark from a time of day, dropping seconds.
    pub fn from_time(time: NaiveTime) -> Self {
        Self(time.format("%H:%M").to_string())
    }

    /// Returns the watermark text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the watermark as a time of day.
    pub fn time(&self) -> NaiveTime {
        // Validated at construction.
        NaiveTime::parse_from_str(&self.0, "%H:%M").unwrap_or(NaiveTime::MIN)
    }
}

impl TryFrom<String> for Watermark {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Watermark> for String {
    fn from(w: Watermark) -> Self {
        w.0
    }
}

impl fmt::Debug for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Watermark({})", self.0)
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serde adapter rendering a `NaiveDate` as `YYYYMMDD`.
pub mod yyyymmdd {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y%m%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_service_date(&s).map_err(serde::de::Error::custom)
    }
}
