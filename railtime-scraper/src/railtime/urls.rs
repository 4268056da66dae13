//! Railtime request URLs.
//!
//! Parameter names and their order match what the mobile site itself
//! generates; Railtime is picky about both.

use chrono::NaiveDate;
use reqwest::Url;

use crate::domain::{Direction, StationId, TripId, Watermark};

use super::client::RailtimeConfig;
use super::error::ScrapeError;

/// Board and trip pages are always requested in Dutch: the trip parser
/// recognizes the Dutch "no data" phrases only. The configured language
/// applies to the station search page, which lists every name anyway.
const PAGE_LANGUAGE: &str = "NL";

fn build(config: &RailtimeConfig, page: &str, params: &[(&str, &str)]) -> Result<String, ScrapeError> {
    let base = format!("{}/{}", config.base_url.trim_end_matches('/'), page);
    Url::parse_with_params(&base, params)
        .map(String::from)
        .map_err(|e| ScrapeError::InvalidUrl(format!("{base}: {e}")))
}

/// `dd/mm/yyyy`, the only date format Railtime accepts.
fn railtime_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// URL of the page listing every station by name.
pub fn search_station_url(config: &RailtimeConfig) -> Result<String, ScrapeError> {
    build(
        config,
        "SearchStationByName.aspx",
        &[("all", "True"), ("l", config.language.as_str())],
    )
}

/// URL of one station-board window.
pub fn station_board_url(
    config: &RailtimeConfig,
    station: &StationId,
    station_name: &str,
    date: NaiveDate,
    time: &Watermark,
    direction: Direction,
) -> Result<String, ScrapeError> {
    build(
        config,
        "StationDetail.aspx",
        &[
            ("l", PAGE_LANGUAGE),
            ("sid", station.as_str()),
            ("sn", station_name),
            ("dt", railtime_date(date).as_str()),
            ("ti", time.as_str()),
            ("da", direction.code()),
        ],
    )
}

/// URL of one direction of a trip-detail page.
pub fn trip_detail_url(
    config: &RailtimeConfig,
    trip: &TripId,
    date: NaiveDate,
    direction: Direction,
) -> Result<String, ScrapeError> {
    build(
        config,
        "TrainDetail.aspx",
        &[
            ("l", PAGE_LANGUAGE),
            ("dt", railtime_date(date).as_str()),
            ("tid", trip.as_str()),
            ("da", direction.code()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2012, 1, 1).unwrap()
    }

    #[test]
    fn search_url() {
        let url = search_station_url(&RailtimeConfig::new()).unwrap();
        assert_eq!(
            url,
            "http://www.railtime.be/mobile/HTML/SearchStationByName.aspx?all=True&l=NL"
        );
    }

    #[test]
    fn board_url_encodes_params() {
        let url = station_board_url(
            &RailtimeConfig::new(),
            &StationId::parse("008821006").unwrap(),
            "Antwerpen-Centraal",
            date(),
            &Watermark::parse("04:15").unwrap(),
            Direction::Departure,
        )
        .unwrap();

        assert_eq!(
            url,
            "http://www.railtime.be/mobile/HTML/StationDetail.aspx\
             ?l=NL&sid=008821006&sn=Antwerpen-Centraal&dt=01%2F01%2F2012&ti=04%3A15&da=D"
        );
    }

    #[test]
    fn board_url_encodes_spaces_in_names() {
        let url = station_board_url(
            &RailtimeConfig::new(),
            &StationId::parse("1").unwrap(),
            "Sint-Niklaas Noord",
            date(),
            &Watermark::parse("23:50").unwrap(),
            Direction::Arrival,
        )
        .unwrap();

        assert!(url.contains("sn=Sint-Niklaas+Noord"));
        assert!(url.ends_with("&da=A"));
    }

    #[test]
    fn trip_url() {
        let config = RailtimeConfig::new().with_base_url("http://localhost:9000/");
        let url = trip_detail_url(
            &config,
            &TripId::parse("1234").unwrap(),
            date(),
            Direction::Arrival,
        )
        .unwrap();

        assert_eq!(
            url,
            "http://localhost:9000/TrainDetail.aspx?l=NL&dt=01%2F01%2F2012&tid=1234&da=A"
        );
    }

    #[test]
    fn language_applies_to_search_page_only() {
        let config = RailtimeConfig::new().with_language("FR");

        assert!(search_station_url(&config).unwrap().ends_with("&l=FR"));

        let trip = trip_detail_url(
            &config,
            &TripId::parse("1234").unwrap(),
            date(),
            Direction::Departure,
        )
        .unwrap();
        assert!(trip.contains("?l=NL&"));

        let board = station_board_url(
            &config,
            &StationId::parse("008814001").unwrap(),
            "Bruxelles-Midi",
            date(),
            &Watermark::parse("04:15").unwrap(),
            Direction::Departure,
        )
        .unwrap();
        assert!(board.contains("?l=NL&"));
    }

    #[test]
    fn bad_base_url() {
        let config = RailtimeConfig::new().with_base_url("not a url");
        assert!(matches!(
            search_station_url(&config),
            Err(ScrapeError::InvalidUrl(_))
        ));
    }
}
