//! Subcommand handlers for list-poses, list-cameras and config actions.

use std::path::Path;

use super::args::ConfigAction;
use crate::camera;
use crate::catalog::POSES;
use crate::config::{default_path, Config};
use crate::error::CollectorError;

/// Print every pose with its menu number and example count.
pub fn list_poses(config: &Config) -> Result<(), CollectorError> {
    let data_dir = &config.paths.data_dir;
    let poses_dir = &config.paths.poses_dir;

    println!("Poses (examples in {}):", data_dir.display());
    for (i, pose) in POSES.iter().enumerate() {
        let reference = if pose.reference_image(poses_dir).is_file() {
            ""
        } else {
            "  [missing reference image]"
        };
        println!(
            "  {}. {} ({}): {}{}",
            i + 1,
            pose.label(),
            pose.slug,
            pose.example_count(data_dir)?,
            reference
        );
    }
    Ok(())
}

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), CollectorError> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
///
/// `show` prints the effective configuration; `init` writes the defaults to
/// `path` (or the default location) without overwriting.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    path: Option<&Path>,
) -> Result<(), CollectorError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, using defaults)", config_path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            Config::default().write_new(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}
