//! Drawing detected landmarks onto frames.

use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use super::skeleton::{KEYPOINT_COLORS, LIMB_COLORS, SKELETON};
use super::{Landmark, PoseError};
use crate::camera::Frame;

/// Keypoints below this visibility are not drawn.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.3;

/// Draw the pose skeleton on a copy of `frame`.
///
/// Limbs are drawn when both ends clear `threshold`, keypoints when they do.
/// Landmark lists longer than the COCO layout draw only the first 17
/// keypoints; shorter ones skip limbs that reference missing points.
pub fn annotate(frame: &Frame, landmarks: &[Landmark], threshold: f32) -> Result<Frame, PoseError> {
    let mut img = frame.to_image().ok_or(PoseError::BadFrame {
        width: frame.width,
        height: frame.height,
    })?;
    let (width, height) = img.dimensions();

    // Scale strokes with the frame so 1080p output stays readable
    let radius = (width.min(height) / 120).max(2) as i32;
    let thickness = (radius / 2).max(1);

    let to_px = |lm: &Landmark| (lm.x * width as f32, lm.y * height as f32);

    for (limb, color) in SKELETON.iter().zip(LIMB_COLORS) {
        let (Some(a), Some(b)) = (landmarks.get(limb[0]), landmarks.get(limb[1])) else {
            continue;
        };
        if a.visibility < threshold || b.visibility < threshold {
            continue;
        }
        let (ax, ay) = to_px(a);
        let (bx, by) = to_px(b);
        for t in -thickness..=thickness {
            let o = t as f32;
            draw_line_segment_mut(&mut img, (ax + o, ay), (bx + o, by), Rgb(color));
            draw_line_segment_mut(&mut img, (ax, ay + o), (bx, by + o), Rgb(color));
        }
    }

    for (lm, color) in landmarks.iter().zip(KEYPOINT_COLORS) {
        if lm.visibility < threshold {
            continue;
        }
        let (x, y) = to_px(lm);
        draw_filled_circle_mut(&mut img, (x.round() as i32, y.round() as i32), radius, Rgb(color));
    }

    let mut annotated = Frame::from_image(img);
    annotated.timestamp = frame.timestamp;
    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::KEYPOINT_COUNT;
    use std::time::Instant;

    fn landmarks(visibility: f32) -> Vec<Landmark> {
        (0..KEYPOINT_COUNT)
            .map(|i| Landmark {
                x: 0.1 + 0.05 * i as f32,
                y: 0.5,
                z: 0.0,
                visibility,
            })
            .collect()
    }

    #[test]
    fn test_annotate_draws_visible_keypoints() {
        let frame = Frame::solid(200, 200, [0, 0, 0]);
        let out = annotate(&frame, &landmarks(0.9), DEFAULT_VISIBILITY_THRESHOLD).unwrap();

        assert_eq!((out.width, out.height), (200, 200));
        // Nose at (20, 100) is drawn in the face color
        assert_eq!(out.pixel(20, 100), Some(KEYPOINT_COLORS[0]));
        // Source frame is untouched
        assert!(frame.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_annotate_skips_low_visibility() {
        let frame = Frame::solid(100, 100, [0, 0, 0]);
        let out = annotate(&frame, &landmarks(0.1), DEFAULT_VISIBILITY_THRESHOLD).unwrap();
        assert_eq!(out.data, frame.data);
    }

    #[test]
    fn test_annotate_short_landmark_list() {
        let frame = Frame::solid(64, 64, [0, 0, 0]);
        let partial = &landmarks(0.9)[..3];
        assert!(annotate(&frame, partial, DEFAULT_VISIBILITY_THRESHOLD).is_ok());
    }

    #[test]
    fn test_annotate_rejects_bad_frame() {
        let frame = Frame {
            data: vec![0; 10],
            width: 10,
            height: 10,
            timestamp: Instant::now(),
        };
        match annotate(&frame, &landmarks(0.9), DEFAULT_VISIBILITY_THRESHOLD) {
            Err(PoseError::BadFrame { width, height }) => assert_eq!((width, height), (10, 10)),
            other => panic!("Expected BadFrame, got {:?}", other),
        }
    }
}
