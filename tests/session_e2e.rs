//! End-to-end tests for a capture session.
//!
//! The camera, terminal and pose model are replaced by scripted fakes so the
//! full menu -> capture -> write flow runs without hardware.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::time::Duration;

use pose_collector::camera::{CameraError, Frame, FrameSource};
use pose_collector::catalog::{self, POSES};
use pose_collector::display::{Display, Key, Overlay};
use pose_collector::error::CollectorError;
use pose_collector::pose::{Landmark, PoseError, PoseEstimator, KEYPOINT_COUNT};
use pose_collector::session::{
    CaptureSession, MenuState, SessionContext, SessionPlan, Timing, PREVIEW_CAPTION,
};
use pose_collector::writer::RESULTS_FILE;
use tempfile::TempDir;

// ==================== Fakes ====================

struct FakeCamera {
    reads: usize,
}

impl FrameSource for FakeCamera {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        self.reads += 1;
        std::thread::sleep(Duration::from_millis(2));
        Ok(Frame::solid(32, 24, [100, 110, 120]))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Shown {
    Frame(Overlay),
    Message(Vec<String>),
    Flash,
}

/// Replays a fixed key script. Zero-timeout polls never see a key, like a
/// terminal with nothing pending.
struct ScriptedDisplay {
    keys: VecDeque<Key>,
    shown: Vec<Shown>,
}

impl ScriptedDisplay {
    fn new(keys: &[Key]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            shown: Vec::new(),
        }
    }

    fn countdown_overlays(&self) -> Vec<(i64, usize)> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Frame(Overlay {
                    countdown: Some(c),
                    remaining: Some(r),
                    ..
                }) => Some((*c, *r)),
                _ => None,
            })
            .collect()
    }
}

impl Display for ScriptedDisplay {
    fn show_frame(&mut self, _frame: &Frame, overlay: &Overlay) -> std::io::Result<()> {
        self.shown.push(Shown::Frame(overlay.clone()));
        Ok(())
    }

    fn show_message(&mut self, lines: &[String], _remaining: Option<usize>) -> std::io::Result<()> {
        self.shown.push(Shown::Message(lines.to_vec()));
        Ok(())
    }

    fn flash(&mut self, _duration: Duration) -> std::io::Result<()> {
        self.shown.push(Shown::Flash);
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> std::io::Result<Option<Key>> {
        if timeout.is_zero() {
            return Ok(None);
        }
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => panic!("Key script exhausted"),
        }
    }
}

struct AlwaysPose;

impl PoseEstimator for AlwaysPose {
    fn estimate(&mut self, _frame: &Frame) -> Result<Option<Vec<Landmark>>, PoseError> {
        Ok(Some(vec![
            Landmark {
                x: 0.5,
                y: 0.5,
                z: 0.0,
                visibility: 0.9,
            };
            KEYPOINT_COUNT
        ]))
    }
}

// ==================== Helpers ====================

struct Workspace {
    _temp: TempDir,
    poses_dir: std::path::PathBuf,
    data_dir: std::path::PathBuf,
}

fn workspace() -> Workspace {
    let temp = TempDir::new().unwrap();
    let poses_dir = temp.path().join("pose_definitions");
    let data_dir = temp.path().join("data");
    fs::create_dir_all(&poses_dir).unwrap();
    for pose in POSES {
        image::RgbImage::from_pixel(8, 8, image::Rgb([200, 50, 50]))
            .save(pose.reference_image(&poses_dir))
            .unwrap();
    }
    Workspace {
        _temp: temp,
        poses_dir,
        data_dir,
    }
}

fn fast_timing() -> Timing {
    Timing {
        first_countdown: Duration::from_millis(60),
        countdown: Duration::from_millis(30),
        shutter: Duration::from_millis(1),
    }
}

fn plan(ws: &Workspace, pose_number: i64, count: i64, timing: Timing) -> SessionPlan {
    SessionPlan::new(pose_number, count, &ws.poses_dir, &ws.data_dir, timing).unwrap()
}

fn context(keys: &[Key]) -> SessionContext<FakeCamera, ScriptedDisplay> {
    SessionContext::new(FakeCamera { reads: 0 }, ScriptedDisplay::new(keys))
}

fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ==================== Menu ====================

#[test]
fn test_enter_confirms_without_reading_camera() {
    let ws = workspace();
    let plan = plan(&ws, 1, 2, fast_timing());
    let mut ctx = context(&[Key::Enter]);

    let state = CaptureSession::new(&plan, &mut ctx).run_menu().unwrap();
    assert_eq!(state, MenuState::Confirmed);
    assert_eq!(ctx.source.reads, 0);
    assert!(ctx.display.countdown_overlays().is_empty());
}

#[test]
fn test_pose_preview_returns_to_menu() {
    let ws = workspace();
    let plan = plan(&ws, 2, 1, fast_timing());
    let mut ctx = context(&[Key::Char('p'), Key::Enter, Key::Enter]);

    let state = CaptureSession::new(&plan, &mut ctx).run_menu().unwrap();
    assert_eq!(state, MenuState::Confirmed);
    // The reference image is shown, not the camera
    assert_eq!(ctx.source.reads, 0);

    let shown = &ctx.display.shown;
    let preview = shown
        .iter()
        .position(|s| matches!(s, Shown::Frame(o) if o.caption.as_deref() == Some(PREVIEW_CAPTION)))
        .expect("pose preview shown");
    // Menu instructions are drawn again after the preview
    assert!(matches!(shown[0], Shown::Message(_)));
    assert!(matches!(shown[preview + 1], Shown::Message(_)));
}

#[test]
fn test_feed_preview_reads_camera() {
    let ws = workspace();
    let plan = plan(&ws, 1, 1, fast_timing());
    let mut ctx = context(&[Key::Char('v'), Key::Char('x'), Key::Escape, Key::Char('q')]);

    let state = CaptureSession::new(&plan, &mut ctx).run_menu().unwrap();
    assert_eq!(state, MenuState::Aborted);
    assert!(ctx.source.reads >= 2);
}

// ==================== Full Session ====================

#[test]
fn test_full_session_writes_examples() {
    let ws = workspace();
    catalog::ensure_data_dirs(&ws.data_dir).unwrap();
    let plan = plan(&ws, 2, 2, fast_timing());
    let mut ctx = context(&[Key::Enter, Key::Enter]);
    let mut estimator = AlwaysPose;

    let report = CaptureSession::new(&plan, &mut ctx)
        .run(&mut estimator)
        .unwrap();

    assert_eq!(report.pose.slug, "tree");
    assert_eq!(report.examples.len(), 2);
    assert!(report.examples.iter().all(|e| e.detected));
    assert_eq!(entry_names(&plan.pose_dir), vec!["1", "2"]);
    assert!(plan.pose_dir.join("2").join(RESULTS_FILE).is_file());

    // One shutter flash per example
    let flashes = ctx.display.shown.iter().filter(|s| **s == Shown::Flash).count();
    assert_eq!(flashes, 2);

    // The debrief names the save location
    let location = plan.pose_dir.display().to_string();
    let last_message = ctx
        .display
        .shown
        .iter()
        .rev()
        .find_map(|s| match s {
            Shown::Message(lines) => Some(lines.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_message[0], "Thank you for participating!");
    assert!(last_message.iter().any(|l| l.contains(&location)));
}

#[test]
fn test_remaining_counts_down() {
    let ws = workspace();
    catalog::ensure_data_dirs(&ws.data_dir).unwrap();
    let plan = plan(&ws, 1, 3, fast_timing());
    let mut ctx = context(&[Key::Enter, Key::Enter]);

    CaptureSession::new(&plan, &mut ctx)
        .run(&mut AlwaysPose)
        .unwrap();

    let mut remaining: Vec<usize> = ctx
        .display
        .countdown_overlays()
        .into_iter()
        .map(|(_, r)| r)
        .collect();
    remaining.dedup();
    assert_eq!(remaining, vec![3, 2, 1]);
}

#[test]
fn test_first_countdown_is_longer() {
    let ws = workspace();
    catalog::ensure_data_dirs(&ws.data_dir).unwrap();
    let timing = Timing {
        first_countdown: Duration::from_millis(1500),
        countdown: Duration::from_millis(500),
        shutter: Duration::from_millis(1),
    };
    let plan = plan(&ws, 1, 3, timing);
    let mut ctx = context(&[Key::Enter, Key::Enter]);

    CaptureSession::new(&plan, &mut ctx)
        .run(&mut AlwaysPose)
        .unwrap();

    let overlays = ctx.display.countdown_overlays();
    let first_shown = |remaining: usize| {
        overlays
            .iter()
            .find(|(_, r)| *r == remaining)
            .map(|(c, _)| *c)
            .unwrap()
    };
    // Each cycle opens on the ceiling of its own duration
    assert_eq!(first_shown(3), 2);
    assert_eq!(first_shown(2), 1);
    assert_eq!(first_shown(1), 1);

    // Every cycle ends on a frame shown below 1
    let mut last_per_cycle = Vec::new();
    for window in overlays.windows(2) {
        if window[0].1 != window[1].1 {
            last_per_cycle.push(window[0].0);
        }
    }
    last_per_cycle.push(overlays.last().unwrap().0);
    assert_eq!(last_per_cycle.len(), 3);
    assert!(last_per_cycle.iter().all(|&c| c < 1));
}

#[test]
fn test_quit_from_menu_writes_nothing() {
    let ws = workspace();
    catalog::ensure_data_dirs(&ws.data_dir).unwrap();
    let plan = plan(&ws, 3, 2, fast_timing());
    let mut ctx = context(&[Key::Char('q')]);

    let result = CaptureSession::new(&plan, &mut ctx).run(&mut AlwaysPose);
    assert!(matches!(result, Err(CollectorError::Aborted)));
    assert_eq!(ctx.source.reads, 0);
    assert!(entry_names(&plan.pose_dir).is_empty());
}

#[test]
fn test_session_appends_after_existing_examples() {
    let ws = workspace();
    catalog::ensure_data_dirs(&ws.data_dir).unwrap();
    let plan = plan(&ws, 1, 1, fast_timing());
    fs::create_dir(plan.pose_dir.join("4")).unwrap();

    let mut ctx = context(&[Key::Enter, Key::Enter]);
    let report = CaptureSession::new(&plan, &mut ctx)
        .run(&mut AlwaysPose)
        .unwrap();
    assert_eq!(report.examples[0].index, 5);
    assert_eq!(entry_names(&plan.pose_dir), vec!["4", "5"]);
}

// ==================== Validation ====================

#[test]
fn test_invalid_selection_fails_before_any_io() {
    let ws = workspace();
    for number in [0, POSES.len() as i64 + 1] {
        let result = SessionPlan::new(number, 2, &ws.poses_dir, &ws.data_dir, fast_timing());
        match result {
            Err(e @ CollectorError::InvalidSelection { .. }) => assert!(e.is_validation()),
            other => panic!("Expected InvalidSelection, got {:?}", other),
        }
    }
    assert!(!ws.data_dir.exists());
}

#[test]
fn test_missing_reference_image() {
    let ws = workspace();
    let slug = POSES[4].slug;
    fs::remove_file(POSES[4].reference_image(&ws.poses_dir)).unwrap();

    match SessionPlan::new(5, 1, &ws.poses_dir, &ws.data_dir, fast_timing()) {
        Err(CollectorError::MissingAsset(path)) => {
            assert!(path.to_string_lossy().contains(slug));
        }
        other => panic!("Expected MissingAsset, got {:?}", other),
    }
}
