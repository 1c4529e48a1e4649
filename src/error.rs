//! Top-level error type for a collection run.
//!
//! Each subsystem has its own error enum; this module folds them into a
//! single [`CollectorError`] that `main` reports before exiting.

use std::path::PathBuf;

use crate::camera::CameraError;
use crate::config::ConfigError;
use crate::pose::PoseError;
use crate::writer::WriterError;

/// Errors that end a collection run.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// Pose number outside the catalog.
    #[error("Please enter a valid number: pose {selected} is not between 1 and {available}")]
    InvalidSelection { selected: i64, available: usize },

    /// Input that does not parse as a number.
    #[error("Please enter a valid number: '{0}' is not a number")]
    InvalidNumber(String),

    /// Requested example count below one.
    #[error("Please enter a valid number: example count must be at least 1, got {0}")]
    InvalidCount(i64),

    /// Reference image for the chosen pose is missing.
    #[error("Could not find example image at {}", .0.display())]
    MissingAsset(PathBuf),

    /// The user backed out of the pre-capture menu.
    #[error("Session aborted before capture")]
    Aborted,

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Writer(#[from] WriterError),

    #[error(transparent)]
    Pose(#[from] PoseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CollectorError {
    /// Whether the error was caused by user input rather than the runtime.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CollectorError::InvalidSelection { .. }
                | CollectorError::InvalidNumber(_)
                | CollectorError::InvalidCount(_)
                | CollectorError::MissingAsset(_)
        )
    }
}
