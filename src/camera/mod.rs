//! Camera access for pose capture.
//!
//! This module provides:
//! - Device enumeration via [`list_devices`]
//! - Synchronous webcam reads via [`Webcam`]
//! - The [`FrameSource`] seam the capture session reads frames through

mod capture;
mod device;
mod frame_utils;
mod types;

pub use capture::Webcam;
pub use device::list_devices;
pub use frame_utils::mirror_horizontal;
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, Resolution};

/// Anything that yields camera frames on demand.
///
/// Reads block until a frame is available. A failed read is fatal to the
/// session; callers do not retry.
pub trait FrameSource {
    /// Read the next frame from the device.
    fn read_frame(&mut self) -> Result<Frame, CameraError>;
}
