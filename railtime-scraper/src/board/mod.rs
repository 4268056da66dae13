//! Station boards: every vehicle calling at a station on a given day.

mod day;
mod window;

pub use day::DayBoardAssembler;
pub use window::{BoardWindow, parse_board_window};
