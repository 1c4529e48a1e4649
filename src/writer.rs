//! Persisting captured frame sequences as indexed example directories.
//!
//! Layout under a pose directory:
//!
//! ```text
//! <pose_dir>/<index>/original.jpg   raw last frame
//! <pose_dir>/<index>/annotated.jpg  frame the landmarks came from, skeleton drawn
//! <pose_dir>/<index>/results.json   landmark array in model order, or null
//! ```
//!
//! Indices continue from the highest existing one. The directory listing is
//! taken once per batch and nothing is locked: only one writer may target a
//! pose directory at a time.

use std::fs::{self, File};
use std::io::BufWriter;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::camera::Frame;
use crate::pose::{self, Landmark, PoseError, PoseEstimator};

/// Raw last frame of the sequence.
pub const ORIGINAL_FILE: &str = "original.jpg";
/// Frame with the detected skeleton drawn on it.
pub const ANNOTATED_FILE: &str = "annotated.jpg";
/// Landmark data.
pub const RESULTS_FILE: &str = "results.json";

/// Errors that can occur while writing a batch.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error("Target directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Unexpected entry '{name}' in {}: example directories must be named by integer index", .dir.display())]
    UnexpectedEntry { dir: PathBuf, name: String },

    #[error("Example directory {} already exists", .0.display())]
    IndexCollision(PathBuf),

    #[error("Example indices in {} exceed the largest supported index", .0.display())]
    IndexOverflow(PathBuf),

    #[error("Frame sequence {0} is empty")]
    EmptySequence(usize),

    #[error("Frame in sequence {0} does not match its dimensions")]
    BadFrame(usize),

    #[error("Failed to write image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Pose analysis failed: {0}")]
    Pose(#[from] PoseError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Progress notice emitted before each example is analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteProgress {
    /// 1-based position in the batch
    pub current: usize,
    /// Batch size
    pub total: usize,
    /// Index of the directory being written
    pub index: u64,
}

/// One example directory written by [`ResultWriter::write_batch`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenExample {
    pub index: u64,
    pub dir: PathBuf,
    /// Whether any frame in the sequence produced landmarks
    pub detected: bool,
}

/// Writes batches of frame sequences into one pose directory.
pub struct ResultWriter<'a, E: PoseEstimator + ?Sized> {
    target_dir: PathBuf,
    estimator: &'a mut E,
}

impl<'a, E: PoseEstimator + ?Sized> ResultWriter<'a, E> {
    pub fn new(target_dir: impl Into<PathBuf>, estimator: &'a mut E) -> Self {
        Self {
            target_dir: target_dir.into(),
            estimator,
        }
    }

    /// Persist every sequence as a new example directory.
    ///
    /// The i-th sequence gets index `next_index + i`. The first error aborts
    /// the rest of the batch; examples already written stay on disk.
    pub fn write_batch(
        &mut self,
        sequences: &[Vec<Frame>],
        mut on_progress: impl FnMut(WriteProgress),
    ) -> Result<Vec<WrittenExample>, WriterError> {
        let first = next_index(&self.target_dir)?;
        let total = sequences.len();
        // The whole batch must fit before anything is written
        first
            .checked_add(total.saturating_sub(1) as u64)
            .ok_or_else(|| WriterError::IndexOverflow(self.target_dir.clone()))?;
        let mut written = Vec::with_capacity(total);

        for (i, frames) in sequences.iter().enumerate() {
            let index = first + i as u64;
            on_progress(WriteProgress {
                current: i + 1,
                total,
                index,
            });
            log::info!("Analyzing example {}/{}", i + 1, total);
            written.push(self.write_example(index, i, frames)?);
        }

        log::info!("Done with analysis");
        Ok(written)
    }

    fn write_example(
        &mut self,
        index: u64,
        position: usize,
        frames: &[Frame],
    ) -> Result<WrittenExample, WriterError> {
        let last = frames.last().ok_or(WriterError::EmptySequence(position))?;

        let dir = self.target_dir.join(index.to_string());
        fs::create_dir(&dir).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                WriterError::IndexCollision(dir.clone())
            } else {
                WriterError::Io {
                    path: dir.clone(),
                    source: e,
                }
            }
        })?;

        save_jpeg(last, &dir.join(ORIGINAL_FILE), position)?;

        let analysis = pose::analyze_sequence(&mut *self.estimator, frames)?
            .ok_or(WriterError::EmptySequence(position))?;
        save_jpeg(&analysis.annotated, &dir.join(ANNOTATED_FILE), position)?;
        write_results(&dir.join(RESULTS_FILE), analysis.landmarks.as_deref())?;

        log::debug!(
            "Wrote example {} to {} (landmarks from frame {})",
            index,
            dir.display(),
            analysis.frame_index
        );
        Ok(WrittenExample {
            index,
            dir,
            detected: analysis.landmarks.is_some(),
        })
    }
}

/// The index one past the highest existing example in `dir` (1 if empty).
///
/// Every entry must be named by a non-negative integer.
pub fn next_index(dir: &Path) -> Result<u64, WriterError> {
    if !dir.is_dir() {
        return Err(WriterError::MissingDirectory(dir.to_path_buf()));
    }

    let io_err = |source| WriterError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut max = 0u64;
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        max = max.max(parse_index(dir, name)?);
    }
    max.checked_add(1)
        .ok_or_else(|| WriterError::IndexOverflow(dir.to_path_buf()))
}

fn parse_index(dir: &Path, name: String) -> Result<u64, WriterError> {
    match name.parse::<u64>() {
        Ok(index) => Ok(index),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            Err(WriterError::IndexOverflow(dir.to_path_buf()))
        }
        Err(_) => Err(WriterError::UnexpectedEntry {
            dir: dir.to_path_buf(),
            name,
        }),
    }
}

fn save_jpeg(frame: &Frame, path: &Path, position: usize) -> Result<(), WriterError> {
    let img = frame.to_image().ok_or(WriterError::BadFrame(position))?;
    img.save_with_format(path, ImageFormat::Jpeg)
        .map_err(|source| WriterError::Image {
            path: path.to_path_buf(),
            source,
        })
}

fn write_results(path: &Path, landmarks: Option<&[Landmark]>) -> Result<(), WriterError> {
    let file = File::create(path).map_err(|source| WriterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer(BufWriter::new(file), &landmarks).map_err(|source| WriterError::Json {
        path: path.to_path_buf(),
        source,
    })
}
