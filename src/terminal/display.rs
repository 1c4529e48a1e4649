//! [`Display`] on the terminal.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::frame::AsciiStyle;
use super::tui::Tui;
use crate::camera::Frame;
use crate::display::{Display, Key, Overlay};

/// Draws frames as colored characters and reads keys from the terminal.
pub struct TerminalDisplay {
    tui: Tui,
    style: AsciiStyle,
}

impl TerminalDisplay {
    /// Take over the terminal. It is restored when this is dropped.
    pub fn new(style: AsciiStyle) -> io::Result<Self> {
        Ok(Self {
            tui: Tui::new()?,
            style,
        })
    }
}

impl Display for TerminalDisplay {
    fn show_frame(&mut self, frame: &Frame, overlay: &Overlay) -> io::Result<()> {
        self.tui.render_image(frame, overlay, &self.style)
    }

    fn show_message(&mut self, lines: &[String], remaining: Option<usize>) -> io::Result<()> {
        self.tui.render_message(lines, remaining)
    }

    fn flash(&mut self, duration: Duration) -> io::Result<()> {
        self.tui.render_flash()?;
        std::thread::sleep(duration);
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            _ => Ok(None),
        }
    }
}

/// Translate a crossterm key event. Only presses count; Ctrl+C is Escape.
pub fn map_key_event(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Escape),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}
