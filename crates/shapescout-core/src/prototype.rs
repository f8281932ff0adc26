//! Nearest-prototype shape classifier.
//!
//! Each shape carries a handful of reference vectors measured from
//! canonical viewing angles plus an acceptance threshold. A query is
//! assigned to the shape owning the globally nearest reference under a
//! scaled Euclidean distance, then accepted only if that distance is
//! within the owning shape's threshold.

use crate::features::{Features, PROTOTYPE_DIM};
use crate::shape::Shape;

/// Per-feature scales normalizing heterogeneous units before the
/// distance: circularity, solidity, ellipse ratio, vertex count, aspect
/// ratio. A vertex differs by whole steps, so it is scaled hardest.
pub const FEATURE_SCALES: [f64; PROTOTYPE_DIM] = [1.0, 1.0, 3.0, 5.0, 2.5];

/// Reference vectors and acceptance threshold for one shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeModel {
    pub shape: Shape,
    pub references: &'static [[f64; PROTOTYPE_DIM]],
    pub threshold: f64,
}

/// Built-in model set, measured on the workshop test solids.
/// Registration order doubles as the tie-break order: when two shapes
/// are exactly equidistant, the earlier entry keeps the detection.
pub static MODELS: [ShapeModel; 6] = [
    ShapeModel {
        shape: Shape::Circle,
        references: &[
            [0.93, 0.96, 1.05, 12.0, 1.05],
            [0.90, 0.94, 1.10, 10.0, 1.00],
        ],
        threshold: 0.55,
    },
    ShapeModel {
        shape: Shape::Square,
        references: &[[0.75, 0.95, 1.30, 4.0, 1.10], [0.70, 0.93, 1.50, 4.0, 1.15]],
        threshold: 0.70,
    },
    ShapeModel {
        shape: Shape::Cube,
        references: &[[0.68, 0.90, 1.80, 6.0, 1.40], [0.65, 0.88, 2.10, 6.0, 1.60]],
        threshold: 0.80,
    },
    ShapeModel {
        shape: Shape::Triangle,
        references: &[[0.58, 0.88, 1.60, 3.0, 1.20]],
        threshold: 0.85,
    },
    ShapeModel {
        shape: Shape::Pyramid,
        references: &[[0.55, 0.85, 1.90, 4.0, 1.50], [0.52, 0.83, 2.20, 4.0, 1.70]],
        threshold: 0.90,
    },
    ShapeModel {
        shape: Shape::Cylinder,
        references: &[
            [0.72, 0.92, 2.80, 8.0, 2.10],
            [0.68, 0.90, 3.50, 7.0, 2.40],
            [0.65, 0.88, 4.20, 6.0, 2.80],
        ],
        threshold: 0.75,
    },
];

/// Scaled Euclidean distance between a query and one reference.
fn distance(query: &[f64; PROTOTYPE_DIM], reference: &[f64; PROTOTYPE_DIM]) -> f64 {
    query
        .iter()
        .zip(reference)
        .zip(FEATURE_SCALES)
        .map(|((q, r), scale)| ((r - q) / scale).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Distance from a query to the nearest reference of one model.
fn model_distance(query: &[f64; PROTOTYPE_DIM], model: &ShapeModel) -> f64 {
    model
        .references
        .iter()
        .map(|reference| distance(query, reference))
        .fold(f64::INFINITY, f64::min)
}

/// Classify against an explicit model set.
///
/// A strictly smaller distance is required to displace the running best,
/// so exact ties resolve to the first-registered shape. Returns the
/// winning shape and a confidence in [0, 1] that falls off linearly with
/// distance; `None` when the nearest shape is still beyond its own
/// threshold.
pub fn classify_with_models(
    features: &Features,
    models: &[ShapeModel],
) -> Option<(Shape, f64)> {
    let query = features.prototype_vector();

    let mut best: Option<(&ShapeModel, f64)> = None;
    for model in models {
        let dist = model_distance(&query, model);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((model, dist));
        }
    }

    let (model, dist) = best?;
    if dist <= model.threshold {
        let confidence = (1.0 - dist / model.threshold).max(0.0);
        Some((model.shape, confidence))
    } else {
        None
    }
}

/// Classify against the built-in [`MODELS`].
pub fn classify(features: &Features) -> Option<(Shape, f64)> {
    classify_with_models(features, &MODELS)
}
