//! The fixed catalog of poses examples can be collected for.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CollectorError;

/// A pose the collector can record examples of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    /// Stable identifier, used for directory and asset names
    pub slug: &'static str,
}

/// All supported poses, in menu order.
pub const POSES: &[Pose] = &[
    Pose { slug: "mountain" },
    Pose { slug: "tree" },
    Pose { slug: "downward_dog" },
    Pose { slug: "warrior_one" },
    Pose { slug: "warrior_two" },
    Pose { slug: "triangle" },
    Pose { slug: "standing_forward_bend" },
    Pose { slug: "chair" },
    Pose { slug: "cobra" },
];

/// Reference image extension under the pose definitions directory.
const REFERENCE_EXT: &str = "jpg";

impl Pose {
    /// Human readable label: every `_` becomes a space and every word is capitalized.
    pub fn label(&self) -> String {
        snake_to_title(self.slug)
    }

    /// Path of the reference image for this pose under `definitions_dir`.
    pub fn reference_image(&self, definitions_dir: &Path) -> PathBuf {
        definitions_dir.join(format!("{}.{}", self.slug, REFERENCE_EXT))
    }

    /// The reference image path, or `MissingAsset` if it is not a file.
    pub fn require_reference(&self, definitions_dir: &Path) -> Result<PathBuf, CollectorError> {
        let path = self.reference_image(definitions_dir);
        if path.is_file() {
            Ok(path)
        } else {
            Err(CollectorError::MissingAsset(path))
        }
    }

    /// Directory holding this pose's examples under `data_dir`.
    pub fn data_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.slug)
    }

    /// Number of entries currently in this pose's data directory.
    ///
    /// A missing directory counts as zero examples.
    pub fn example_count(&self, data_dir: &Path) -> std::io::Result<usize> {
        let dir = self.data_dir(data_dir);
        if !dir.exists() {
            return Ok(0);
        }
        Ok(std::fs::read_dir(dir)?.count())
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Convert `snake_case` to `Title Case`.
pub fn snake_to_title(snake: &str) -> String {
    snake
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up a pose by its 1-based menu number.
pub fn select(number: i64) -> Result<Pose, CollectorError> {
    if number < 1 || number as usize > POSES.len() {
        return Err(CollectorError::InvalidSelection {
            selected: number,
            available: POSES.len(),
        });
    }
    Ok(POSES[(number - 1) as usize])
}

/// Create the data directory and one subdirectory per pose.
pub fn ensure_data_dirs(data_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    for pose in POSES {
        std::fs::create_dir_all(pose.data_dir(data_dir))?;
    }
    Ok(())
}
