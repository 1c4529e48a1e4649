//! Synchronous webcam handle.

use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};

use super::FrameSource;
use super::device::list_devices;
use super::frame_utils::{convert_to_rgb, mirror_horizontal};
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// An open webcam stream read on the calling thread.
///
/// The stream is opened by [`Webcam::open`] and stopped when the handle is
/// dropped, so holding a `Webcam` means holding the device exclusively.
pub struct Webcam {
    camera: Camera,
    settings: CameraSettings,
    resolution: Resolution,
    fps: u32,
}

impl std::fmt::Debug for Webcam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Webcam")
            .field("settings", &self.settings)
            .field("resolution", &self.resolution)
            .field("fps", &self.fps)
            .finish_non_exhaustive()
    }
}

impl Webcam {
    /// Open the camera at `settings.device_index` and start streaming.
    ///
    /// # Errors
    /// * `CameraError::NoDevices` - If no camera is connected
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    /// * `CameraError::PermissionDenied` - If camera access is denied (macOS)
    /// * `CameraError::StreamFailed` - If the stream fails to start
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        if devices.is_empty() {
            return Err(CameraError::NoDevices);
        }
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }

        let index = CameraIndex::Index(settings.device_index);
        let mut camera = open_camera_with_fallback(&index, &settings)?;
        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        let res = camera.resolution();
        let resolution = Resolution {
            width: res.width(),
            height: res.height(),
        };
        let fps = camera.frame_rate();
        log::info!(
            "Opened camera {} at {}x{} @ {} fps",
            settings.device_index,
            resolution.width,
            resolution.height,
            fps
        );

        Ok(Self {
            camera,
            settings,
            resolution,
            fps,
        })
    }

    /// Get the current camera settings.
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Resolution the device actually negotiated.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Frame rate the device actually negotiated.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl FrameSource for Webcam {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        let raw = self
            .camera
            .frame()
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        let mut frame = convert_to_rgb(&raw)
            .ok_or_else(|| CameraError::ReadFailed("could not decode frame".to_string()))?;
        if self.settings.mirror {
            mirror_horizontal(&mut frame);
        }
        Ok(frame)
    }
}

impl Drop for Webcam {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera stream: {}", e);
        } else {
            log::debug!("Camera released");
        }
    }
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let resolution =
        nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height);

    // NV12 is the native macOS format, MJPEG is widely supported elsewhere,
    // and the last attempt lets the camera pick.
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            resolution,
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            resolution,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;
    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format attempt failed: {}", e);
                last_error = Some(e);
            }
        }
    }

    let Some(e) = last_error else {
        return Err(CameraError::OpenFailed("no format attempts".to_string()));
    };
    let msg = e.to_string().to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(e.to_string()))
    }
}
