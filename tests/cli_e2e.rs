//! End-to-end tests of the binary's input validation.
//!
//! Each run is rejected before any device is opened, so no camera, model
//! or terminal is needed.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run_collector(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pose-collector"))
        .arg("--config")
        .arg(root.join("config.toml"))
        .arg("--data-dir")
        .arg(root.join("data"))
        .arg("--poses-dir")
        .arg(root.join("pose_definitions"))
        .args(extra)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Should run pose-collector")
}

#[test]
fn test_invalid_pose_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_collector(temp_dir.path(), &["--pose", "0", "--count", "1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(!temp_dir.path().join("data").exists());
}

#[test]
fn test_missing_reference_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_collector(temp_dir.path(), &["--pose", "2", "--count", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("data").exists());
}

#[test]
fn test_invalid_count_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let definitions = temp_dir.path().join("pose_definitions");
    std::fs::create_dir(&definitions).unwrap();
    std::fs::write(definitions.join("tree.jpg"), b"reference").unwrap();

    let output = run_collector(temp_dir.path(), &["--pose", "2", "--count", "0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no files were created"), "stderr: {}", stderr);
    assert!(!temp_dir.path().join("data").exists());
}
