//! Railtime station board and trip scraper.
//!
//! Rebuilds whole service days for a station, and whole trips, from the
//! paginated HTML pages of the Belgian railtime.be mobile site.

pub mod board;
pub mod cache;
pub mod domain;
pub mod html;
pub mod railtime;
pub mod scraper;
pub mod stations;
pub mod trip;
pub mod web;

#[cfg(test)]
mod testdata;
