//! Fitting an image into a character grid without distorting it.

/// Terminal cells are roughly twice as tall as they are wide.
pub const DEFAULT_CHAR_ASPECT_RATIO: f32 = 2.0;

/// Largest `(columns, rows)` grid within `max_cols` x `max_rows` that shows
/// an `img_width` x `img_height` image at its own aspect ratio.
///
/// Returns `(0, 0)` if any input is zero.
pub fn fit_dimensions(img_width: u32, img_height: u32, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if img_width == 0 || img_height == 0 || max_cols == 0 || max_rows == 0 {
        return (0, 0);
    }

    // Columns per row that reproduces the image aspect on screen
    let cols_per_row = img_width as f32 / img_height as f32 * DEFAULT_CHAR_ASPECT_RATIO;

    let rows = (max_cols as f32 / cols_per_row).round() as u16;
    if rows > 0 && rows <= max_rows {
        return (max_cols, rows);
    }

    let cols = ((max_rows as f32 * cols_per_row).round() as u16).min(max_cols);
    (cols.max(1), max_rows)
}
