//! Camera acquisition.

use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};
use thiserror::Error;
use tracing::{info, warn};

/// Faults surfaced by the capture layer. Device loss is recoverable
/// through [`Camera::reconnect`]; everything in the detection core
/// downstream of a valid frame is infallible by construction.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no camera could be opened (tried index {preferred}, then {fallback})")]
    NoDevice { preferred: i32, fallback: i32 },
    #[error("camera backend error: {0}")]
    Backend(#[from] opencv::Error),
    #[error("frame read failed")]
    FrameRead,
}

/// Camera stream configuration.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Preferred device index; the external camera enumerates after the
    /// built-in one on the robot.
    pub index: i32,
    /// Index tried when the preferred device will not open.
    pub fallback_index: i32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Driver-side buffer depth. 1 keeps frames fresh at the cost of
    /// occasional drops.
    pub buffer_size: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 1,
            fallback_index: 0,
            width: 640,
            height: 480,
            fps: 30,
            buffer_size: 1,
        }
    }
}

/// Live camera with reconnect support.
pub struct Camera {
    config: CameraConfig,
    capture: VideoCapture,
    index: i32,
}

impl Camera {
    /// Open the preferred device, falling back across backends and then
    /// to the fallback index.
    pub fn open(config: CameraConfig) -> Result<Self, CaptureError> {
        let (capture, index) = open_any(&config)?;
        let mut camera = Self {
            config,
            capture,
            index,
        };
        camera.apply_properties();
        info!("camera {} opened", camera.index);
        Ok(camera)
    }

    /// Read the next frame.
    pub fn grab(&mut self) -> Result<Mat, CaptureError> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Err(CaptureError::FrameRead);
        }
        Ok(frame)
    }

    /// Release and reopen the device after a lost frame.
    pub fn reconnect(&mut self) -> Result<(), CaptureError> {
        warn!("reopening camera {}", self.index);
        self.capture.release()?;
        let (capture, index) = open_any(&self.config)?;
        self.capture = capture;
        self.index = index;
        self.apply_properties();
        Ok(())
    }

    /// Device index actually in use.
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Best-effort stream properties; a driver refusing one is logged,
    /// not fatal.
    fn apply_properties(&mut self) {
        let properties = [
            (videoio::CAP_PROP_FRAME_WIDTH, self.config.width as f64),
            (videoio::CAP_PROP_FRAME_HEIGHT, self.config.height as f64),
            (videoio::CAP_PROP_FPS, self.config.fps as f64),
            (videoio::CAP_PROP_BUFFERSIZE, self.config.buffer_size as f64),
        ];
        for (property, value) in properties {
            match self.capture.set(property, value) {
                Ok(true) => {}
                Ok(false) => warn!("camera ignored property {property} = {value}"),
                Err(e) => warn!("could not set camera property {property}: {e}"),
            }
        }
        if let Ok(fourcc) = videoio::VideoWriter::fourcc('M', 'J', 'P', 'G') {
            let _ = self.capture.set(videoio::CAP_PROP_FOURCC, fourcc as f64);
        }
    }
}

fn open_any(config: &CameraConfig) -> Result<(VideoCapture, i32), CaptureError> {
    for index in [config.index, config.fallback_index] {
        for backend in [videoio::CAP_V4L2, videoio::CAP_ANY] {
            if let Ok(capture) = VideoCapture::new(index, backend) {
                if capture.is_opened().unwrap_or(false) {
                    return Ok((capture, index));
                }
            }
        }
    }
    Err(CaptureError::NoDevice {
        preferred: config.index,
        fallback: config.fallback_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stream_shape() {
        let config = CameraConfig::default();
        assert_eq!((config.width, config.height, config.fps), (640, 480, 30));
        assert_eq!(config.buffer_size, 1);
        assert_ne!(config.index, config.fallback_index);
    }

    #[test]
    fn test_no_device_error_names_indices() {
        let err = CaptureError::NoDevice {
            preferred: 1,
            fallback: 0,
        };
        let message = err.to_string();
        assert!(message.contains('1') && message.contains('0'));
    }
}
