//! Rendering functions for the capture screens.
//!
//! Pure layout on a ratatui frame; terminal lifecycle lives in `tui`.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use super::frame::{AsciiFrame, AsciiStyle};
use crate::camera::Frame;
use crate::display::Overlay;

/// Height of a big countdown glyph in rows.
pub const DIGIT_HEIGHT: u16 = 5;

#[rustfmt::skip]
const DIGITS: [[&str; 5]; 10] = [
    ["█████", "█   █", "█   █", "█   █", "█████"],
    ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
    ["█████", "    █", "█████", "█    ", "█████"],
    ["█████", "    █", " ████", "    █", "█████"],
    ["█   █", "█   █", "█████", "    █", "    █"],
    ["█████", "█    ", "█████", "    █", "█████"],
    ["█████", "█    ", "█████", "█   █", "█████"],
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    ["█████", "█   █", "█████", "█   █", "█████"],
    ["█████", "█   █", "█████", "    █", "█████"],
];

/// Rows of `value` drawn in the block font. Negative values draw as 0.
pub fn big_number(value: i64) -> Vec<String> {
    let digits: Vec<usize> = value
        .max(0)
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();

    (0..DIGIT_HEIGHT as usize)
        .map(|row| {
            digits
                .iter()
                .map(|&d| DIGITS[d][row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// A `width` x `height` rect centered in `area`, clamped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Text for the remaining-examples counter.
pub fn remaining_label(remaining: usize) -> String {
    format!("Number of examples left: {}", remaining)
}

/// Draw `image` centered in the frame with `overlay` on top.
pub fn render_image(
    frame: &mut ratatui::Frame,
    image: &Frame,
    overlay: &Overlay,
    style: &AsciiStyle,
) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let ascii = AsciiFrame::render(image, area.width, area.height, style);
    let image_area = centered(area, ascii.width, ascii.height);
    frame.render_widget(Paragraph::new(ascii.to_lines()), image_area);

    render_overlay(frame, overlay, area);
}

/// Countdown, remaining counter and caption over whatever is drawn.
pub fn render_overlay(frame: &mut ratatui::Frame, overlay: &Overlay, area: Rect) {
    let label = Style::default()
        .fg(Color::White)
        .bg(Color::Black)
        .add_modifier(Modifier::BOLD);

    if let Some(remaining) = overlay.remaining {
        render_remaining(frame, remaining, area);
    }

    if let Some(count) = overlay.countdown {
        let rows = big_number(count);
        let width = rows.first().map_or(0, |r| r.chars().count()) as u16;
        let rect = centered(area, width, DIGIT_HEIGHT);
        frame.render_widget(Clear, rect);
        let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
        frame.render_widget(Paragraph::new(lines).style(label), rect);
    }

    if let Some(caption) = &overlay.caption {
        let rect = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(2),
            width: area.width,
            height: 1u16.min(area.height),
        };
        frame.render_widget(
            Paragraph::new(caption.as_str())
                .style(label)
                .alignment(Alignment::Center),
            rect,
        );
    }
}

fn render_remaining(frame: &mut ratatui::Frame, remaining: usize, area: Rect) {
    let text = remaining_label(remaining);
    let rect = Rect {
        x: area.x + 1u16.min(area.width),
        y: area.y,
        width: (text.chars().count() as u16).min(area.width.saturating_sub(1)),
        height: 1u16.min(area.height),
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::White)),
        rect,
    );
}

/// Centered lines on a blank screen.
pub fn render_message(frame: &mut ratatui::Frame, lines: &[String], remaining: Option<usize>) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let rect = centered(area, width, lines.len() as u16);
    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center),
        rect,
    );

    if let Some(remaining) = remaining {
        render_remaining(frame, remaining, area);
    }
}

/// Solid white screen.
pub fn render_flash(frame: &mut ratatui::Frame) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(Color::White)), area);
}
