//! Geometric descriptors computed from a single contour.

use serde::{Deserialize, Serialize};

/// Dimensionality of the vector fed to the prototype classifier.
pub const PROTOTYPE_DIM: usize = 5;

/// Axis ratio reported when no ellipse can be fitted to a contour
/// (fewer than five points, or a degenerate fit). Treats the contour
/// as isotropic.
pub const DEFAULT_ELLIPSE_RATIO: f64 = 1.0;

/// Fixed descriptor set for one contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Contour area in pixels squared.
    pub area: f64,
    /// `4 * pi * area / perimeter^2`; 1.0 for a perfect circle, lower for
    /// anything with corners or elongation.
    pub circularity: f64,
    /// Contour area over convex hull area, in (0, 1]. Convex solids score
    /// near 1.0.
    pub solidity: f64,
    /// Major over minor axis of the best-fit ellipse, >= 1.0, or
    /// [`DEFAULT_ELLIPSE_RATIO`] when no ellipse fits.
    pub ellipse_ratio: f64,
    /// Vertex count of the simplified polygon.
    pub vertices: usize,
    /// Long over short side of the axis-aligned bounding box, >= 1.0.
    pub aspect_ratio: f64,
}

impl Features {
    /// Projection used for prototype distances. Area is deliberately
    /// excluded so the distance does not depend on how close the object
    /// sits to the camera.
    pub fn prototype_vector(&self) -> [f64; PROTOTYPE_DIM] {
        [
            self.circularity,
            self.solidity,
            self.ellipse_ratio,
            self.vertices as f64,
            self.aspect_ratio,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_vector_excludes_area() {
        let features = Features {
            area: 12_345.0,
            circularity: 0.8,
            solidity: 0.9,
            ellipse_ratio: 1.5,
            vertices: 4,
            aspect_ratio: 1.2,
        };
        assert_eq!(features.prototype_vector(), [0.8, 0.9, 1.5, 4.0, 1.2]);
    }
}
