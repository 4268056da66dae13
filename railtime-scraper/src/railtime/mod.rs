//! Railtime mobile-site access.
//!
//! Railtime (railtime.be) publishes the Belgian rail schedule only as HTML
//! pages meant for mobile browsers. This module knows how to address those
//! pages and how to fetch them; it knows nothing about their contents.
//!
//! Key characteristics of Railtime:
//! - Every page reports one direction only (`da=D` or `da=A`)
//! - Station boards cover a short time window; a full day takes dozens of
//!   requests, each one starting where the previous window ended
//! - Dates are `dd/mm/yyyy`, times are `HH:MM` local time

mod client;
mod error;
pub mod mock;
mod urls;

pub use client::{Fetcher, HttpFetcher, RailtimeConfig};
pub use error::{FetchError, ScrapeError};
pub use mock::MockFetcher;
pub use urls::{search_station_url, station_board_url, trip_detail_url};
