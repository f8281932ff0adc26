//! OpenCV-backed segmentation and detection pipeline.
//!
//! Turns camera frames into ranked [`Detection`](shapescout_core::Detection)
//! lists: per-color HSV segmentation, contour feature extraction, shape
//! classification, plus the thin capture and display wrappers around the
//! detection core.

pub mod capture;
pub mod config;
pub mod detector;
pub mod display;
pub mod draw;
pub mod features;
pub mod segment;

pub use capture::{Camera, CameraConfig, CaptureError};
pub use config::{ClassifierKind, DetectorConfig};
pub use detector::{DetectionResult, FrameStats, ShapeDetector};
pub use display::{KEY_ESC, Window};
pub use features::FeatureExtractor;
pub use segment::ColorSegmenter;

// Error handling
pub type Result<T> = anyhow::Result<T>;
