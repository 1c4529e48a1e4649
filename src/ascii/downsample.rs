//! Averaging pixels into character cells.

use crate::camera::Frame;

/// Average RGB color of a character cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Pixel ranges `(x0..x1, y0..y1)` covered by each cell, row-major.
fn cells(
    img_width: u32,
    img_height: u32,
    cols: u16,
    rows: u16,
) -> impl Iterator<Item = (std::ops::Range<u32>, std::ops::Range<u32>)> {
    let cell_w = img_width as f32 / cols as f32;
    let cell_h = img_height as f32 / rows as f32;
    (0..rows).flat_map(move |cy| {
        (0..cols).map(move |cx| {
            let x0 = (cx as f32 * cell_w) as u32;
            let x1 = (((cx + 1) as f32 * cell_w) as u32).max(x0 + 1).min(img_width);
            let y0 = (cy as f32 * cell_h) as u32;
            let y1 = (((cy + 1) as f32 * cell_h) as u32).max(y0 + 1).min(img_height);
            (x0..x1, y0..y1)
        })
    })
}

/// Average a grayscale image down to one brightness value per cell.
///
/// Returns `cols * rows` values, or nothing if any dimension is zero.
pub fn downsample(gray: &[u8], img_width: u32, img_height: u32, cols: u16, rows: u16) -> Vec<u8> {
    if cols == 0 || rows == 0 || img_width == 0 || img_height == 0 || gray.is_empty() {
        return Vec::new();
    }

    cells(img_width, img_height, cols, rows)
        .map(|(xs, ys)| {
            let mut sum = 0u32;
            let mut count = 0u32;
            for y in ys {
                for x in xs.clone() {
                    if let Some(&v) = gray.get((y * img_width + x) as usize) {
                        sum += v as u32;
                        count += 1;
                    }
                }
            }
            if count > 0 { (sum / count) as u8 } else { 0 }
        })
        .collect()
}

/// Average an RGB frame down to one color per cell.
pub fn downsample_colors(frame: &Frame, cols: u16, rows: u16) -> Vec<CellColor> {
    if cols == 0 || rows == 0 || frame.width == 0 || frame.height == 0 || frame.data.is_empty() {
        return Vec::new();
    }

    cells(frame.width, frame.height, cols, rows)
        .map(|(xs, ys)| {
            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for y in ys {
                for x in xs.clone() {
                    if let Some(p) = frame.pixel(x, y) {
                        for (s, v) in sum.iter_mut().zip(p) {
                            *s += v as u32;
                        }
                        count += 1;
                    }
                }
            }
            if count == 0 {
                return CellColor::default();
            }
            CellColor {
                r: (sum[0] / count) as u8,
                g: (sum[1] / count) as u8,
                b: (sum[2] / count) as u8,
            }
        })
        .collect()
}
