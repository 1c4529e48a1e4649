//! The display surface the capture session draws on and reads keys from.

use std::io;
use std::time::Duration;

use crate::camera::Frame;

/// A key press relevant to the capture workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, lowercased
    Char(char),
    Enter,
    Escape,
}

impl Key {
    /// Enter leaves previews and confirms the menu.
    pub fn is_confirm(&self) -> bool {
        matches!(self, Key::Enter)
    }

    /// `q` or Esc backs out of the current screen.
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Escape | Key::Char('q'))
    }
}

/// Text drawn over a live frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Large centered countdown number
    pub countdown: Option<i64>,
    /// "Number of examples left" value in the top-left corner
    pub remaining: Option<usize>,
    /// Centered caption, e.g. preview instructions
    pub caption: Option<String>,
}

impl Overlay {
    pub fn countdown(count: i64, remaining: usize) -> Self {
        Self {
            countdown: Some(count),
            remaining: Some(remaining),
            caption: None,
        }
    }

    pub fn caption(text: impl Into<String>) -> Self {
        Self {
            caption: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Where frames and messages are shown, and where keys come from.
///
/// Drawing never mutates the frame passed in: overlays are composed on the
/// display side only.
pub trait Display {
    /// Draw a camera frame or image with an overlay.
    fn show_frame(&mut self, frame: &Frame, overlay: &Overlay) -> io::Result<()>;

    /// Draw centered text lines on a blank surface.
    fn show_message(&mut self, lines: &[String], remaining: Option<usize>) -> io::Result<()>;

    /// Fill the surface white for `duration`, then return.
    fn flash(&mut self, duration: Duration) -> io::Result<()>;

    /// Wait up to `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Key>>;
}
