//! Pose estimation over captured frame sequences.
//!
//! The estimator itself sits behind [`PoseEstimator`]; [`MoveNet`] is the
//! ONNX Runtime implementation used by the binary. [`analyze_sequence`]
//! feeds a whole countdown's worth of frames through an estimator and picks
//! the result that gets persisted.

mod annotate;
mod movenet;
mod skeleton;

pub use annotate::{annotate, DEFAULT_VISIBILITY_THRESHOLD};
pub use movenet::{MoveNet, MoveNetConfig};
pub use skeleton::{KEYPOINT_COUNT, SKELETON};

use serde::{Deserialize, Serialize};

use crate::camera::Frame;

/// One tracked body keypoint.
///
/// `x` and `y` are normalized to the frame (0.0 top/left, 1.0 bottom/right).
/// `z` is depth relative to the hips for 3-D models and 0.0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
}

/// Errors raised by a pose estimator.
#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Pose model not found at {0}")]
    ModelNotFound(String),

    #[error("Failed to load pose model: {0}")]
    ModelLoad(String),

    #[error("Pose inference failed: {0}")]
    Inference(String),

    #[error("Frame buffer does not match its {width}x{height} dimensions")]
    BadFrame { width: u32, height: u32 },
}

/// A pose estimation backend.
///
/// Frames are fed in capture order so stateful backends can track across
/// them. `Ok(None)` means the frame was processed but no pose was found.
pub trait PoseEstimator {
    fn estimate(&mut self, frame: &Frame) -> Result<Option<Vec<Landmark>>, PoseError>;
}

impl<E: PoseEstimator + ?Sized> PoseEstimator for Box<E> {
    fn estimate(&mut self, frame: &Frame) -> Result<Option<Vec<Landmark>>, PoseError> {
        (**self).estimate(frame)
    }
}

/// Outcome of analyzing one frame sequence.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Landmarks from the last frame with a detection, `None` if no frame had one
    pub landmarks: Option<Vec<Landmark>>,
    /// The analyzed frame with the skeleton drawn on it
    pub annotated: Frame,
    /// Index in the sequence of the frame the result came from
    pub frame_index: usize,
}

/// Run `estimator` over every frame and keep the last detection.
///
/// When no frame yields a pose, the result carries no landmarks and the
/// literal last frame, unannotated. Returns `None` for an empty sequence.
pub fn analyze_sequence<E: PoseEstimator + ?Sized>(
    estimator: &mut E,
    frames: &[Frame],
) -> Result<Option<Analysis>, PoseError> {
    let Some(last_index) = frames.len().checked_sub(1) else {
        return Ok(None);
    };

    let mut best: Option<(usize, Vec<Landmark>)> = None;
    for (i, frame) in frames.iter().enumerate() {
        match estimator.estimate(frame)? {
            Some(landmarks) => best = Some((i, landmarks)),
            None => log::debug!("No pose detected in frame {}", i),
        }
    }

    let analysis = match best {
        Some((i, landmarks)) => Analysis {
            annotated: annotate(&frames[i], &landmarks, DEFAULT_VISIBILITY_THRESHOLD)?,
            landmarks: Some(landmarks),
            frame_index: i,
        },
        None => {
            log::warn!(
                "No pose detected in any of {} frames, keeping the last frame unannotated",
                frames.len()
            );
            Analysis {
                landmarks: None,
                annotated: frames[last_index].clone(),
                frame_index: last_index,
            }
        }
    };
    Ok(Some(analysis))
}
