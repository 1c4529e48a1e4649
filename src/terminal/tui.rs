//! TUI wrapper that manages the ratatui terminal with crossterm backend.
//!
//! This module handles terminal lifecycle (entering/exiting raw mode,
//! alternate screen) while delegating layout to the `rendering` module.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::atomic::Ordering;

use super::frame::AsciiStyle;
use super::raw_mode::{RAW_MODE_ACTIVE, install_panic_hook};
use super::rendering;
use crate::camera::Frame;
use crate::display::Overlay;

/// TUI wrapper that manages the ratatui terminal with crossterm backend.
///
/// Raw mode and the alternate screen are entered on creation and restored
/// on drop (or explicit [`Tui::restore`]), including when the app panics.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether this TUI is responsible for cleanup
    active: bool,
}

impl Tui {
    /// Create a new TUI, entering raw mode and alternate screen.
    ///
    /// # Errors
    /// Returns an error if raw mode, the alternate screen or the terminal
    /// backend cannot be set up.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Restore the terminal to its original state.
    ///
    /// After calling this, the Tui's drop will be a no-op.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            )?;
            disable_raw_mode()?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    /// Check if the TUI is still active (not yet restored).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Draw a frame or image with an overlay.
    pub fn render_image(
        &mut self,
        image: &Frame,
        overlay: &Overlay,
        style: &AsciiStyle,
    ) -> io::Result<()> {
        self.terminal.draw(|frame| {
            rendering::render_image(frame, image, overlay, style);
        })?;
        Ok(())
    }

    /// Draw centered text on a blank screen.
    pub fn render_message(
        &mut self,
        lines: &[String],
        remaining: Option<usize>,
    ) -> io::Result<()> {
        self.terminal.draw(|frame| {
            rendering::render_message(frame, lines, remaining);
        })?;
        Ok(())
    }

    /// Fill the screen white.
    pub fn render_flash(&mut self) -> io::Result<()> {
        self.terminal.draw(rendering::render_flash)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            // Best-effort cleanup - ignore errors during drop
            let _ = crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            );
            let _ = disable_raw_mode();
            let _ = self.terminal.show_cursor();
        }
    }
}
