//! Canned Railtime pages for tests.
//!
//! Shapes follow the mobile site: rows are `<tr class=…>` with positional
//! `<label>`s, station boards repeat a header table before the data table,
//! and trip pages render terminal stops without a station link.

use std::fmt::Write;

/// Number of distinct stations on [`search_page`].
pub const SEARCH_PAGE_STATIONS: usize = 6;

/// The station search page (`SearchStationByName.aspx?all=True&l=NL`).
pub fn search_page() -> String {
    let links = [
        ("008814001", "Brussel-Zuid"),
        ("008821006", "Antwerpen-Centraal"),
        ("008814001", "Bruxelles-Midi"),
        ("008822005", "Mechelen"),
        ("008841004", "Li&egrave;ge-Guillemins"),
        ("008891702", "Oostende"),
        ("008892007", "Gent-Sint-Pieters"),
    ];

    let mut html = String::from("<html><body><ul>\n");
    for (sid, name) in links {
        let _ = writeln!(
            html,
            r#"<li><a href="StationDetail.aspx?sid={sid}&amp;l=NL&amp;s=1">{name}</a></li>"#
        );
    }
    html.push_str("</ul></body></html>");
    html
}

/// One vehicle row of a station board.
pub struct BoardRow<'a> {
    pub time: &'a str,
    pub tid: &'a str,
    pub headsign: &'a str,
    pub vehicle_type: &'a str,
    pub platform: &'a str,
}

impl<'a> BoardRow<'a> {
    pub fn new(time: &'a str, tid: &'a str, headsign: &'a str) -> Self {
        Self {
            time,
            tid,
            headsign,
            vehicle_type: "IC",
            platform: "3",
        }
    }

    pub fn vehicle_type(mut self, vehicle_type: &'a str) -> Self {
        self.vehicle_type = vehicle_type;
        self
    }

    pub fn platform(mut self, platform: &'a str) -> Self {
        self.platform = platform;
        self
    }
}

/// A station board window listing `rows`, displaying `(start - end)`.
pub fn board_page(start: &str, end: &str, rows: &[BoardRow<'_>]) -> String {
    let mut html = String::from(
        "<html><body>\n\
         <table class=\"Menu\"><tr class=\"MenuRow\"><td><label>Vertrek</label></td>\
         <td><label>Aankomst</label></td></tr></table>\n",
    );
    let _ = writeln!(html, "<div class=\"Window\">Treinen ({start} - {end})</div>");
    html.push_str("<table class=\"StationDetail\">\n");
    for row in rows {
        let _ = writeln!(
            html,
            "<tr class=\"rowStation\">\
             <td><label>{time}</label></td>\
             <td><label>+0</label></td>\
             <td><a href=\"TrainDetail.aspx?l=NL&amp;tid={tid}&amp;dt=01/01/2012&amp;da=D\">\
             <label>{headsign}</label></a></td>\
             <td><label>[{vehicle_type}]</label></td>\
             <td><label></label></td>\
             <td><label>{platform}</label></td>\
             </tr>",
            time = row.time,
            tid = row.tid,
            headsign = row.headsign,
            vehicle_type = row.vehicle_type,
            platform = row.platform,
        );
    }
    html.push_str("</table></body></html>");
    html
}

/// One stop row of a trip-detail page.
pub enum TripRow<'a> {
    /// A stop rendered with a station link.
    Linked {
        sid: &'a str,
        name: &'a str,
        time: &'a str,
        delay: &'a str,
    },
    /// A terminal stop: plain labels, no station link.
    Terminal {
        name: &'a str,
        time: &'a str,
        delay: &'a str,
    },
    /// A linked stop the train no longer calls at.
    Cancelled { sid: &'a str, name: &'a str },
    /// A terminal stop the train no longer reaches.
    CancelledTerminal { name: &'a str },
}

/// A trip-detail page. `type_token` is the bracketed header token, e.g.
/// `IC 1234`; `None` mimics a cancelled train whose type was dropped.
pub fn trip_page(type_token: Option<&str>, rows: &[TripRow<'_>]) -> String {
    let mut html = String::from("<html><body>\n");
    match type_token {
        Some(token) => {
            let _ = writeln!(html, "<h1 class=\"Train\">[{token}]</h1>");
        }
        None => html.push_str("<h1 class=\"Train\">[1234]</h1>\n"),
    }
    html.push_str("<table class=\"TrainDetail\">\n");
    for row in rows {
        match row {
            TripRow::Linked {
                sid,
                name,
                time,
                delay,
            } => {
                let _ = writeln!(
                    html,
                    "<tr class=\"rowTrain\"><td><label>{time}</label></td>\
                     <td><label class=\"Delay\">{delay}</label></td>\
                     <td><a href=\"StationDetail.aspx?l=NL&amp;sid={sid}&amp;dt=01/01/2012\">{name}</a></td></tr>"
                );
            }
            TripRow::Terminal { name, time, delay } => {
                let _ = writeln!(
                    html,
                    "<tr class=\"rowTrain\"><td><label class=\"Center\">{name}</label></td>\
                     <td><label>{time}</label></td>\
                     <td><label class=\"Delay\">{delay}</label></td></tr>"
                );
            }
            TripRow::Cancelled { sid, name } => {
                let _ = writeln!(
                    html,
                    "<tr class=\"rowTrain\"><td><label class=\"TrainDeleted\">--:--</label></td>\
                     <td><label class=\"TrainDeleted\"></label></td>\
                     <td><a class=\"TrainDeleted\" href=\"StationDetail.aspx?l=NL&amp;sid={sid}&amp;dt=01/01/2012\">{name}</a></td></tr>"
                );
            }
            TripRow::CancelledTerminal { name } => {
                let _ = writeln!(
                    html,
                    "<tr class=\"rowTrain\"><td><label class=\"CenterTrainDeleted\">{name}</label></td>\
                     <td><label class=\"TrainDeleted\">--:--</label></td>\
                     <td><label class=\"TrainDeleted\"></label></td></tr>"
                );
            }
        }
    }
    html.push_str("</table></body></html>");
    html
}

/// Trip page for a train whose data has been retired.
pub const TRIP_RETIRED_PAGE: &str =
    "<html><body><p class=\"Error\">Deze gegevens zijn niet langer beschikbaar.</p></body></html>";

/// Trip page for a train that does not run on the requested date.
pub const TRIP_NOT_ON_DATE_PAGE: &str =
    "<html><body><p class=\"Error\">Deze trein bestaat niet voor de gevraagde datum.</p></body></html>";
