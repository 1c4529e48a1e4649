//! RGB to grayscale conversion using the ITU-R BT.601 luminance formula.

use crate::camera::Frame;

/// Luminance of every pixel, `Y = 0.299*R + 0.587*G + 0.114*B`.
///
/// Integer math with coefficients scaled by 1000.
pub fn to_grayscale(frame: &Frame) -> Vec<u8> {
    frame
        .data
        .chunks_exact(Frame::BYTES_PER_PIXEL)
        .map(|rgb| {
            let (r, g, b) = (rgb[0] as u32, rgb[1] as u32, rgb[2] as u32);
            ((299 * r + 587 * g + 114 * b) / 1000) as u8
        })
        .collect()
}
