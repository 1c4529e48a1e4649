//! Terminal display: raw mode, the ratatui wrapper and the capture screens.

mod display;
mod frame;
mod raw_mode;
pub mod rendering;
mod tui;

pub use display::{map_key_event, TerminalDisplay};
pub use frame::{AsciiFrame, AsciiStyle};
pub use tui::Tui;
