//! Domain types and classifiers for colored-solid detection.
//!
//! Everything here is computable without an image library: color
//! profiles, shape labels, geometric feature vectors and the two
//! classifiers (rule cascade and nearest prototype). The OpenCV-facing
//! pipeline lives in `shapescout-cv`.

pub mod color;
pub mod detection;
pub mod features;
pub mod prototype;
pub mod rules;
pub mod shape;

pub use color::{Color, HsvRange, NoiseFilter};
pub use detection::{BoundingBox, Detection, rank_detections};
pub use features::{DEFAULT_ELLIPSE_RATIO, Features, PROTOTYPE_DIM};
pub use shape::Shape;
