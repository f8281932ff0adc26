//! Detection records produced by the frame pipeline.

use crate::color::Color;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometric center of the box. The pipeline reports the moment
    /// centroid instead; this is for drawing.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// One accepted classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub color: Color,
    pub shape: Shape,
    /// Area-weighted centroid of the source contour.
    pub center: (i32, i32),
    pub bbox: BoundingBox,
    /// Source contour area; the ranking key.
    pub area: f64,
    /// Distance-based confidence from the prototype classifier. `None`
    /// on the rule path, which is a yes/no decision.
    pub confidence: Option<f64>,
}

/// Order a frame's detections by area descending and cap the list.
///
/// The sort is stable: equal areas keep their insertion order, which
/// puts colored detections ahead of black ones on ties.
pub fn rank_detections(detections: &mut Vec<Detection>, cap: usize) {
    detections.sort_by(|a, b| b.area.total_cmp(&a.area));
    detections.truncate(cap);
}
