//! Command-line interface definitions and helpers.
//!
//! This module contains argument parsing, the stdin prompts and the
//! subcommand handlers.

mod args;
mod commands;
mod prompt;

pub use args::{Args, CharacterSet, Command, ConfigAction};
pub use commands::{handle_config_action, list_cameras, list_poses};
pub use prompt::{parse_number, prompt_count, prompt_pose, pose_menu};
