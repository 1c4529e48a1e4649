//! MoveNet single-pose estimator on ONNX Runtime.

use std::path::PathBuf;

use image::imageops::{self, FilterType};
use ndarray::Array4;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;

use super::skeleton::KEYPOINT_COUNT;
use super::{Landmark, PoseError, PoseEstimator};
use crate::camera::Frame;

/// Settings for the MoveNet estimator.
#[derive(Debug, Clone)]
pub struct MoveNetConfig {
    /// Path to the exported ONNX model
    pub model_path: PathBuf,
    /// Square input edge (192 for Lightning, 256 for Thunder)
    pub input_size: u32,
    /// Minimum mean keypoint score for a frame to count as a detection
    pub min_detection_confidence: f32,
}

impl Default for MoveNetConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/movenet_lightning.onnx"),
            input_size: 192,
            min_detection_confidence: 0.3,
        }
    }
}

/// MoveNet pose estimator.
///
/// Expects an NHWC float input of `[1, size, size, 3]` with 0-255 values
/// and a `[1, 1, 17, 3]` output of `(y, x, score)` triples normalized to the
/// input frame.
pub struct MoveNet {
    session: Session,
    input_name: String,
    output_name: String,
    config: MoveNetConfig,
}

impl std::fmt::Debug for MoveNet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveNet")
            .field("config", &self.config)
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .finish_non_exhaustive()
    }
}

impl MoveNet {
    /// Load the model described by `config`.
    ///
    /// # Errors
    /// * `PoseError::ModelNotFound` - If the model file does not exist
    /// * `PoseError::ModelLoad` - If ONNX Runtime rejects the model
    pub fn load(config: MoveNetConfig) -> Result<Self, PoseError> {
        if !config.model_path.exists() {
            return Err(PoseError::ModelNotFound(
                config.model_path.display().to_string(),
            ));
        }

        let session = Session::builder()
            .map_err(|e| PoseError::ModelLoad(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PoseError::ModelLoad(e.to_string()))?
            .commit_from_file(&config.model_path)
            .map_err(|e| PoseError::ModelLoad(e.to_string()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| PoseError::ModelLoad("model has no inputs".to_string()))?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PoseError::ModelLoad("model has no outputs".to_string()))?;

        log::info!(
            "Loaded pose model {} (input '{}', output '{}')",
            config.model_path.display(),
            input_name,
            output_name
        );

        Ok(Self {
            session,
            input_name,
            output_name,
            config,
        })
    }

    fn preprocess(&self, frame: &Frame) -> Result<Array4<f32>, PoseError> {
        let img = frame.to_image().ok_or(PoseError::BadFrame {
            width: frame.width,
            height: frame.height,
        })?;
        let size = self.config.input_size;
        let resized = imageops::resize(&img, size, size, FilterType::Triangle);

        let s = size as usize;
        let mut tensor = Array4::<f32>::zeros((1, s, s, 3));
        for (x, y, px) in resized.enumerate_pixels() {
            for c in 0..3 {
                tensor[[0, y as usize, x as usize, c]] = px[c] as f32;
            }
        }
        Ok(tensor)
    }
}

impl PoseEstimator for MoveNet {
    fn estimate(&mut self, frame: &Frame) -> Result<Option<Vec<Landmark>>, PoseError> {
        let input = self.preprocess(frame)?;
        let input_tensor =
            Tensor::from_array(input).map_err(|e| PoseError::Inference(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| PoseError::Inference(e.to_string()))?;
        let output: ndarray::ArrayViewD<f32> = outputs[self.output_name.as_str()]
            .try_extract_array()
            .map_err(|e| PoseError::Inference(e.to_string()))?;

        let values: Vec<f32> = output.iter().copied().collect();
        Ok(decode_keypoints(&values, self.config.min_detection_confidence))
    }
}

/// Turn flat `(y, x, score)` triples into landmarks.
///
/// Returns `None` when the output is too short or the mean score is below
/// `min_confidence`.
pub(crate) fn decode_keypoints(values: &[f32], min_confidence: f32) -> Option<Vec<Landmark>> {
    if values.len() < KEYPOINT_COUNT * 3 {
        return None;
    }

    let landmarks: Vec<Landmark> = values
        .chunks_exact(3)
        .take(KEYPOINT_COUNT)
        .map(|kp| Landmark {
            x: kp[1].clamp(0.0, 1.0),
            y: kp[0].clamp(0.0, 1.0),
            z: 0.0,
            visibility: kp[2],
        })
        .collect();

    let mean_score =
        landmarks.iter().map(|l| l.visibility).sum::<f32>() / landmarks.len() as f32;
    if mean_score < min_confidence {
        log::debug!("Pose rejected, mean keypoint score {:.2}", mean_score);
        return None;
    }
    Some(landmarks)
}
