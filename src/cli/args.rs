//! CLI argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::ascii::CharSet;
use crate::config::Config;

/// Collect labeled yoga pose examples from a webcam
#[derive(Parser, Debug)]
#[command(name = "pose-collector")]
#[command(version, about = "Collect labeled yoga pose examples from a webcam", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Pose number from the menu (prompted for if omitted)
    #[arg(long, short)]
    pub pose: Option<i64>,

    /// Number of examples to record (prompted for if omitted)
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Directory examples are written to
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the pose reference images
    #[arg(long)]
    pub poses_dir: Option<PathBuf>,

    /// MoveNet ONNX model file
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Mirror camera horizontally
    #[arg(long)]
    pub mirror: bool,

    /// ASCII character set for the live view
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(camera) = self.camera {
            config.camera.device = camera;
        }
        if self.mirror {
            config.camera.mirror = true;
        }
        if let Some(dir) = &self.data_dir {
            config.paths.data_dir = dir.clone();
        }
        if let Some(dir) = &self.poses_dir {
            config.paths.poses_dir = dir.clone();
        }
        if let Some(model) = &self.model {
            config.paths.model = model.clone();
        }
        if let Some(charset) = self.charset {
            config.ascii.charset = Some(CharSet::from(charset).name().to_string());
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List poses with their existing example counts
    ListPoses,
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Character set for rendering frames in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CharacterSet {
    /// 10-level ASCII ramp
    Standard,
    /// Unicode block characters
    Blocks,
    /// 4-level ramp
    Minimal,
}

impl From<CharacterSet> for CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => CharSet::Standard,
            CharacterSet::Blocks => CharSet::Blocks,
            CharacterSet::Minimal => CharSet::Minimal,
        }
    }
}
