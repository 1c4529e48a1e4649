//! One end-to-end capture session.
//!
//! A session runs in three phases on the calling thread:
//!
//! 1. **Menu** - instructions, pose preview (`p`), feed preview (`v`),
//!    Enter to start. See [`MenuState`].
//! 2. **Capture** - one [`FrameBufferRecorder`] cycle per requested example.
//!    The first cycle uses the long lead-in countdown.
//! 3. **Write** - the whole batch goes to the [`ResultWriter`], then the
//!    debrief screen waits for Enter.
//!
//! Inputs are validated by [`SessionPlan::new`] before any device is
//! opened. Devices live in a [`SessionContext`]; dropping it releases the
//! camera and restores the terminal whether the session succeeded or not.

mod menu;
mod recorder;

pub use menu::MenuState;
pub use recorder::{countdown_value, FrameBufferRecorder};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::camera::{Frame, FrameSource};
use crate::catalog::{self, Pose};
use crate::display::{Display, Key, Overlay};
use crate::error::CollectorError;
use crate::pose::PoseEstimator;
use crate::writer::{ResultWriter, WriteProgress, WrittenExample};

/// Caption drawn over both preview screens.
pub const PREVIEW_CAPTION: &str = "Press Enter to exit preview";

/// How long key waits block before re-polling.
const KEY_POLL: Duration = Duration::from_millis(50);

/// Countdown and shutter durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Countdown before the first example
    pub first_countdown: Duration,
    /// Countdown before every later example
    pub countdown: Duration,
    /// White flash after each capture
    pub shutter: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            first_countdown: Duration::from_secs(5),
            countdown: Duration::from_secs(3),
            shutter: Duration::from_millis(300),
        }
    }
}

impl Timing {
    /// Countdown for the 0-based `example`.
    ///
    /// Only the first capture gets the long lead-in, to give the subject time
    /// to step back into position once.
    pub fn countdown_for(&self, example: usize) -> Duration {
        if example == 0 {
            self.first_countdown
        } else {
            self.countdown
        }
    }
}

/// Validated inputs for a session.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub pose: Pose,
    pub count: usize,
    /// Reference image shown by the pose preview
    pub reference_image: PathBuf,
    /// Directory examples are written into
    pub pose_dir: PathBuf,
    pub timing: Timing,
}

impl SessionPlan {
    /// Validate a menu selection and example count.
    ///
    /// Fails without touching devices or creating anything when the pose
    /// number is out of range, the count is below one, or the reference
    /// image is missing.
    pub fn new(
        pose_number: i64,
        count: i64,
        definitions_dir: &Path,
        data_dir: &Path,
        timing: Timing,
    ) -> Result<Self, CollectorError> {
        let pose = catalog::select(pose_number)?;
        Self::for_pose(pose, count, definitions_dir, data_dir, timing)
    }

    /// Same as [`SessionPlan::new`] for an already chosen pose.
    pub fn for_pose(
        pose: Pose,
        count: i64,
        definitions_dir: &Path,
        data_dir: &Path,
        timing: Timing,
    ) -> Result<Self, CollectorError> {
        let reference_image = pose.require_reference(definitions_dir)?;
        if count < 1 {
            return Err(CollectorError::InvalidCount(count));
        }

        Ok(Self {
            pose,
            count: count as usize,
            reference_image,
            pose_dir: pose.data_dir(data_dir),
            timing,
        })
    }
}

/// Devices held for the length of one session.
///
/// Built after validation and dropped when the session ends, which stops
/// the camera stream and restores the display.
pub struct SessionContext<S: FrameSource, D: Display> {
    pub source: S,
    pub display: D,
}

impl<S: FrameSource, D: Display> SessionContext<S, D> {
    pub fn new(source: S, display: D) -> Self {
        Self { source, display }
    }
}

/// What a finished session produced.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub pose: Pose,
    pub examples: Vec<WrittenExample>,
}

/// Drives the menu, the capture cycles and the final write.
pub struct CaptureSession<'a, S: FrameSource, D: Display> {
    plan: &'a SessionPlan,
    ctx: &'a mut SessionContext<S, D>,
}

impl<'a, S: FrameSource, D: Display> CaptureSession<'a, S, D> {
    pub fn new(plan: &'a SessionPlan, ctx: &'a mut SessionContext<S, D>) -> Self {
        Self { plan, ctx }
    }

    /// Run the whole session.
    ///
    /// Returns `CollectorError::Aborted` if the user quits the menu. Once the
    /// menu is confirmed the session cannot be cancelled.
    pub fn run<E: PoseEstimator + ?Sized>(
        &mut self,
        estimator: &mut E,
    ) -> Result<SessionReport, CollectorError> {
        if self.run_menu()? == MenuState::Aborted {
            log::info!("Session aborted from the menu");
            return Err(CollectorError::Aborted);
        }

        let sequences = self.capture_all()?;

        self.ctx
            .display
            .show_message(&processing_lines(), None)?;
        let examples = self.write_all(&sequences, estimator)?;

        let save_location = self.plan.pose_dir.display().to_string();
        self.ctx
            .display
            .show_message(&debrief_lines(&save_location), None)?;
        self.wait_for(|k| k.is_confirm())?;

        Ok(SessionReport {
            pose: self.plan.pose,
            examples,
        })
    }

    /// Run the menu until Enter or quit. Returns the terminal state.
    pub fn run_menu(&mut self) -> Result<MenuState, CollectorError> {
        let mut state = MenuState::Menu;
        while !state.is_terminal() {
            let key = match state {
                MenuState::PreviewingPose => self.preview_pose()?,
                MenuState::PreviewingFeed => self.preview_feed()?,
                _ => {
                    let lines = instruction_lines(self.plan.count, &self.plan.timing);
                    self.ctx
                        .display
                        .show_message(&lines, Some(self.plan.count))?;
                    self.wait_for(|_| true)?
                }
            };
            state = state.on_key(key);
        }
        Ok(state)
    }

    /// Record every example, counting the remaining display down.
    pub fn capture_all(&mut self) -> Result<Vec<Vec<Frame>>, CollectorError> {
        let timing = self.plan.timing;
        let total = self.plan.count;
        let mut sequences = Vec::with_capacity(total);

        let SessionContext { source, display } = &mut *self.ctx;
        let mut recorder = FrameBufferRecorder::new(source, display, timing.shutter);
        for i in 0..total {
            let remaining = total - i;
            log::info!("Capturing example {}/{}", i + 1, total);
            sequences.push(recorder.record(timing.countdown_for(i), remaining)?);
        }
        Ok(sequences)
    }

    fn write_all<E: PoseEstimator + ?Sized>(
        &mut self,
        sequences: &[Vec<Frame>],
        estimator: &mut E,
    ) -> Result<Vec<WrittenExample>, CollectorError> {
        let display = &mut self.ctx.display;
        let mut writer = ResultWriter::new(&self.plan.pose_dir, estimator);
        let examples = writer.write_batch(sequences, |progress| {
            if let Err(e) = display.show_message(&progress_lines(progress), None) {
                log::warn!("Failed to show progress: {}", e);
            }
        })?;
        Ok(examples)
    }

    fn preview_pose(&mut self) -> Result<Key, CollectorError> {
        let image = image::open(&self.plan.reference_image)?.to_rgb8();
        let frame = Frame::from_image(image);
        let overlay = Overlay::caption(PREVIEW_CAPTION);
        loop {
            self.ctx.display.show_frame(&frame, &overlay)?;
            if let Some(key) = self.ctx.display.poll_key(KEY_POLL)? {
                if key.is_confirm() || key.is_quit() {
                    return Ok(key);
                }
            }
        }
    }

    fn preview_feed(&mut self) -> Result<Key, CollectorError> {
        let overlay = Overlay::caption(PREVIEW_CAPTION);
        loop {
            let frame = self.ctx.source.read_frame()?;
            self.ctx.display.show_frame(&frame, &overlay)?;
            if let Some(key) = self.ctx.display.poll_key(Duration::from_millis(1))? {
                if key.is_confirm() || key.is_quit() {
                    return Ok(key);
                }
            }
        }
    }

    fn wait_for(&mut self, accept: impl Fn(Key) -> bool) -> Result<Key, CollectorError> {
        loop {
            match self.ctx.display.poll_key(KEY_POLL)? {
                Some(key) if accept(key) => return Ok(key),
                _ => {}
            }
        }
    }
}

/// Menu screen text.
pub fn instruction_lines(count: usize, timing: &Timing) -> Vec<String> {
    vec![
        "When you start, you will see a countdown timer.".to_string(),
        "When it reaches 0, your pose will be captured and used as an example.".to_string(),
        format!(
            "On the first picture, you will be given {} seconds to get back and into the pose,",
            timing.first_countdown.as_secs()
        ),
        format!(
            "but the subsequent {} countdowns will be {} seconds.",
            count.saturating_sub(1),
            timing.countdown.as_secs()
        ),
        "After the session is finished, you should review the examples and decide which ones are worth keeping."
            .to_string(),
        String::new(),
        "Press 'p' to preview the pose.".to_string(),
        "Press 'v' to preview your video feed and position yourself.".to_string(),
        "Press Enter to begin, or 'q' to quit...".to_string(),
    ]
}

/// Shown while the batch is analyzed and written.
pub fn processing_lines() -> Vec<String> {
    vec![
        "Performing pose estimation.".to_string(),
        "Please wait patiently for the process to finish.".to_string(),
    ]
}

fn progress_lines(progress: WriteProgress) -> Vec<String> {
    let mut lines = processing_lines();
    lines.push(String::new());
    lines.push(format!(
        "Analyzing example {}/{}",
        progress.current, progress.total
    ));
    lines
}

/// Final screen text.
pub fn debrief_lines(save_location: &str) -> Vec<String> {
    vec![
        "Thank you for participating!".to_string(),
        format!("Your examples are in {}.", save_location),
        "Please manually check them to ensure accuracy.".to_string(),
        "Press Enter to exit.".to_string(),
    ]
}
