//! Character-grid rendering of camera frames.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::ascii::{self, CellColor, CharSet};
use crate::camera::Frame;

/// How frames are turned into characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiStyle {
    pub charset: CharSet,
    /// Flip the brightness ramp for light terminal themes
    pub invert: bool,
    /// Draw each cell in its averaged true color
    pub color: bool,
}

impl Default for AsciiStyle {
    fn default() -> Self {
        Self {
            charset: CharSet::Standard,
            invert: false,
            color: true,
        }
    }
}

/// A frame rendered to characters.
#[derive(Debug, Clone, Default)]
pub struct AsciiFrame {
    /// Characters, row-major
    pub chars: Vec<char>,
    /// Per-cell colors, same length as `chars` when present
    pub colors: Option<Vec<CellColor>>,
    pub width: u16,
    pub height: u16,
}

impl AsciiFrame {
    /// Render `frame` as large as fits in `max_cols` x `max_rows` while
    /// keeping its aspect ratio.
    pub fn render(frame: &Frame, max_cols: u16, max_rows: u16, style: &AsciiStyle) -> Self {
        let (width, height) = ascii::fit_dimensions(frame.width, frame.height, max_cols, max_rows);
        if width == 0 || height == 0 {
            return Self::default();
        }

        let gray = ascii::to_grayscale(frame);
        let brightness = ascii::downsample(&gray, frame.width, frame.height, width, height);
        let chars = ascii::map_to_chars(&brightness, style.charset.chars(), style.invert);
        let colors = style
            .color
            .then(|| ascii::downsample_colors(frame, width, height));

        Self {
            chars,
            colors,
            width,
            height,
        }
    }

    /// Rows as styled ratatui lines.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        if self.width == 0 {
            return Vec::new();
        }

        let width = self.width as usize;
        self.chars
            .chunks(width)
            .enumerate()
            .map(|(row, chars)| match &self.colors {
                Some(colors) => {
                    let start = row * width;
                    let spans: Vec<Span<'static>> = chars
                        .iter()
                        .zip(&colors[start..start + chars.len()])
                        .map(|(c, color)| {
                            Span::styled(
                                c.to_string(),
                                Style::default().fg(Color::Rgb(color.r, color.g, color.b)),
                            )
                        })
                        .collect();
                    Line::from(spans)
                }
                None => Line::from(chars.iter().collect::<String>()),
            })
            .collect()
    }

    /// Plain text, rows joined by newlines.
    pub fn to_string_display(&self) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }

        self.chars
            .chunks(self.width as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fits_grid() {
        let frame = Frame::solid(640, 480, [255, 255, 255]);
        let ascii = AsciiFrame::render(&frame, 80, 24, &AsciiStyle::default());
        assert!(ascii.width <= 80);
        assert!(ascii.height <= 24);
        assert_eq!(ascii.chars.len(), ascii.width as usize * ascii.height as usize);
        assert!(ascii.chars.iter().all(|&c| c == '@'));
        assert_eq!(ascii.colors.as_ref().map(Vec::len), Some(ascii.chars.len()));
    }

    #[test]
    fn test_render_without_color() {
        let frame = Frame::solid(32, 32, [0, 0, 0]);
        let style = AsciiStyle {
            color: false,
            ..AsciiStyle::default()
        };
        let ascii = AsciiFrame::render(&frame, 16, 16, &style);
        assert!(ascii.colors.is_none());
        assert_eq!(ascii.to_lines().len(), ascii.height as usize);
    }

    #[test]
    fn test_render_into_empty_area() {
        let frame = Frame::solid(32, 32, [0, 0, 0]);
        let ascii = AsciiFrame::render(&frame, 0, 10, &AsciiStyle::default());
        assert_eq!(ascii.width, 0);
        assert!(ascii.to_lines().is_empty());
        assert_eq!(ascii.to_string_display(), "");
    }

    #[test]
    fn test_to_string_display() {
        let ascii = AsciiFrame {
            chars: vec!['#', '.', ':', '@', '*', '+'],
            colors: None,
            width: 3,
            height: 2,
        };
        assert_eq!(ascii.to_string_display(), "#.:\n@*+");
    }
}
