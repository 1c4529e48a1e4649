//! One countdown cycle: buffer frames while counting down, then flash.

use std::time::{Duration, Instant};

use crate::camera::{Frame, FrameSource};
use crate::display::{Display, Overlay};
use crate::error::CollectorError;

/// Displayed countdown value: remaining seconds, rounded up.
///
/// Goes to 0 exactly when `elapsed` reaches `duration` and negative after.
pub fn countdown_value(duration: Duration, elapsed: Duration) -> i64 {
    (duration.as_secs_f64() - elapsed.as_secs_f64()).ceil() as i64
}

/// Records the frames of one countdown cycle.
pub struct FrameBufferRecorder<'a, S: FrameSource + ?Sized, D: Display + ?Sized> {
    source: &'a mut S,
    display: &'a mut D,
    shutter: Duration,
}

impl<'a, S: FrameSource + ?Sized, D: Display + ?Sized> FrameBufferRecorder<'a, S, D> {
    pub fn new(source: &'a mut S, display: &'a mut D, shutter: Duration) -> Self {
        Self {
            source,
            display,
            shutter,
        }
    }

    /// Count down from `countdown`, buffering every frame read meanwhile.
    ///
    /// Each frame is shown with the countdown and `remaining` drawn over it;
    /// the buffered copies are untouched. The last frame in the returned
    /// sequence is the one read when the countdown dropped below 1. Runs to
    /// completion: keys pressed during the countdown are discarded.
    pub fn record(
        &mut self,
        countdown: Duration,
        remaining: usize,
    ) -> Result<Vec<Frame>, CollectorError> {
        let start = Instant::now();
        let mut frames = Vec::new();

        loop {
            let count = countdown_value(countdown, start.elapsed());
            let frame = self.source.read_frame()?;
            self.display
                .show_frame(&frame, &Overlay::countdown(count, remaining))?;
            frames.push(frame);

            if count < 1 {
                self.display.flash(self.shutter)?;
                log::debug!(
                    "Recorded {} frames over {:?}",
                    frames.len(),
                    start.elapsed()
                );
                return Ok(frames);
            }

            // Drain input so presses during the countdown don't leak into the debrief
            let _ = self.display.poll_key(Duration::ZERO)?;
        }
    }
}
