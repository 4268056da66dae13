//! Raw record extraction from Railtime HTML.
//!
//! Railtime pages are not well-formed enough to walk as a DOM, and every
//! piece of data sits in a predictable `<tr class=…>` row as a run of
//! `<label>` elements. The helpers here cut pages into those rows and rows
//! into labels; the board and trip parsers give the labels meaning.

use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;

use crate::domain::{StationId, TripId};

static ROW_REGEX: OnceLock<Regex> = OnceLock::new();
static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();
static ANCHOR_REGEX: OnceLock<Regex> = OnceLock::new();
static TRIP_ID_REGEX: OnceLock<Regex> = OnceLock::new();
static TABLE_REGEX: OnceLock<Regex> = OnceLock::new();

fn row_regex() -> &'static Regex {
    ROW_REGEX.get_or_init(|| Regex::new(r"(?is)<tr class.+?>(.+?)</tr>").unwrap())
}

fn label_regex() -> &'static Regex {
    LABEL_REGEX.get_or_init(|| Regex::new(r"(?is)<label.*?>(.*?)</label>").unwrap())
}

fn anchor_regex() -> &'static Regex {
    ANCHOR_REGEX
        .get_or_init(|| Regex::new(r"(?is)<a\b[^>]*?[?&;]sid=(\d+)[^>]*>(.*?)</a>").unwrap())
}

fn trip_id_regex() -> &'static Regex {
    TRIP_ID_REGEX.get_or_init(|| Regex::new(r"(?i)[?&;]tid=(\d+)").unwrap())
}

fn table_regex() -> &'static Regex {
    TABLE_REGEX.get_or_init(|| Regex::new(r"(?i)<table\b").unwrap())
}

/// A station link embedded in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationAnchor {
    pub id: StationId,
    pub name: String,
}

/// Inner HTML of every `<tr class…>` row, in document order.
///
/// The iterator is lazy and borrows `html`; call again to restart.
pub fn extract_rows(html: &str) -> impl Iterator<Item = &str> {
    row_regex()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The document from its last `<table>` onwards.
///
/// Board pages repeat a header table before the one holding vehicle rows.
/// Documents without any table are returned whole.
pub fn last_table(html: &str) -> &str {
    match table_regex().find_iter(html).last() {
        Some(m) => &html[m.start()..],
        None => html,
    }
}

/// Decoded text of every `<label>` in a row, in order.
pub fn extract_labels(row: &str) -> Vec<String> {
    label_regex()
        .captures_iter(row)
        .map(|caps| caps.get(1).map(|m| decode_text(m.as_str())).unwrap_or_default())
        .collect()
}

/// The `(id, name)` of the first station link in a row.
///
/// Returns `None` when the row has no link. Terminal stops on trip pages
/// render as plain labels, so `None` is an expected outcome there.
pub fn extract_station_anchor(row: &str) -> Option<StationAnchor> {
    anchor_regex().captures_iter(row).find_map(|caps| {
        let id = StationId::parse(caps.get(1)?.as_str()).ok()?;
        let name = decode_text(caps.get(2)?.as_str());
        Some(StationAnchor { id, name })
    })
}

/// The vehicle id from a row's `tid=` query parameter.
pub fn extract_trip_id(row: &str) -> Option<TripId> {
    trip_id_regex()
        .captures(row)
        .and_then(|caps| caps.get(1))
        .and_then(|m| TripId::parse(m.as_str()).ok())
}

/// Strip markup from an HTML fragment, decode its entities and trim it.
pub fn decode_text(fragment: &str) -> String {
    if !fragment.contains(['<', '&']) {
        return fragment.trim().to_string();
    }
    let parsed = Html::parse_fragment(fragment);
    let text: String = parsed.root_element().text().collect();
    text.trim().to_string()
}
