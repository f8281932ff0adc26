//! Rule-cascade shape classifier.
//!
//! An ordered decision list: the first rule whose guard accepts the
//! feature vector wins and no later rule is consulted. Circle and
//! cylinder rank before the vertex-count rules because circularity and
//! elongation survive perspective distortion better than polygon
//! approximation does. Pyramid ranks before square so the elongated,
//! low-circularity four-vertex case is claimed before the generic one.

use crate::features::Features;
use crate::shape::Shape;

/// Guard predicate over a feature vector.
pub type Rule = fn(&Features) -> bool;

/// The cascade, most reliable signal first.
pub static RULES: [(Shape, Rule); 6] = [
    (Shape::Circle, is_circle),
    (Shape::Cylinder, is_cylinder),
    (Shape::Triangle, is_triangle),
    (Shape::Pyramid, is_pyramid),
    (Shape::Square, is_square),
    (Shape::Cube, is_cube),
];

/// First matching rule wins. `None` leaves the contour unclassified and
/// it is dropped from the frame's detections.
pub fn classify(features: &Features) -> Option<Shape> {
    RULES
        .iter()
        .find(|(_, rule)| rule(features))
        .map(|(shape, _)| *shape)
}

fn is_circle(f: &Features) -> bool {
    f.circularity > 0.89 && f.ellipse_ratio < 1.9 && f.solidity > 0.93
}

/// A lying cylinder reads as an elongated ellipse: stretched, convex,
/// but nowhere near circular.
fn is_cylinder(f: &Features) -> bool {
    f.ellipse_ratio > 2.3 && f.circularity > 0.45 && f.circularity < 0.83 && f.solidity > 0.83
}

fn is_triangle(f: &Features) -> bool {
    f.vertices == 3 && f.solidity > 0.80
}

/// Four vertices plus elongation; an upright square never stretches
/// this far.
fn is_pyramid(f: &Features) -> bool {
    f.vertices == 4 && f.aspect_ratio > 1.65 && f.circularity < 0.79
}

fn is_square(f: &Features) -> bool {
    f.vertices == 4 && f.aspect_ratio < 1.55 && f.circularity > 0.71 && f.solidity > 0.89
}

/// A cube off axis shows two or three faces and traces a convex
/// 5..=11-gon.
fn is_cube(f: &Features) -> bool {
    (5..=11).contains(&f.vertices) && f.solidity > 0.88 && f.aspect_ratio < 2.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(
        circularity: f64,
        solidity: f64,
        ellipse_ratio: f64,
        vertices: usize,
        aspect_ratio: f64,
    ) -> Features {
        Features {
            area: 5000.0,
            circularity,
            solidity,
            ellipse_ratio,
            vertices,
            aspect_ratio,
        }
    }

    #[test]
    fn test_clean_circle() {
        assert_eq!(
            classify(&features(0.95, 0.97, 1.05, 10, 1.02)),
            Some(Shape::Circle)
        );
    }

    #[test]
    fn test_three_vertices_always_triangle() {
        // No later rule can see a 3-vertex contour, whatever the rest of
        // the vector looks like.
        for aspect in [1.0, 1.7, 2.4] {
            for circularity in [0.3, 0.6, 0.85] {
                let f = features(circularity, 0.88, 1.6, 3, aspect);
                assert_eq!(classify(&f), Some(Shape::Triangle));
            }
        }
    }

    #[test]
    fn test_circle_rule_shadows_square_rule() {
        // Satisfies both guards; the earlier rule must win.
        let f = features(0.91, 0.95, 1.1, 4, 1.1);
        assert!(is_circle(&f) && is_square(&f));
        assert_eq!(classify(&f), Some(Shape::Circle));
    }

    #[test]
    fn test_cylinder_rule_shadows_cube_rule() {
        let f = features(0.70, 0.90, 2.5, 6, 2.3);
        assert!(is_cylinder(&f) && is_cube(&f));
        assert_eq!(classify(&f), Some(Shape::Cylinder));
    }

    #[test]
    fn test_elongated_quad_is_pyramid_not_square() {
        let f = features(0.60, 0.92, 1.9, 4, 1.8);
        assert_eq!(classify(&f), Some(Shape::Pyramid));
    }

    #[test]
    fn test_perfect_square() {
        // The analytic square: circularity pi/4, full solidity, square
        // bounding box.
        assert_eq!(
            classify(&features(0.785, 1.0, 1.0, 4, 1.0)),
            Some(Shape::Square)
        );
    }

    #[test]
    fn test_hexagonal_silhouette_is_cube() {
        assert_eq!(
            classify(&features(0.68, 0.91, 1.8, 6, 1.4)),
            Some(Shape::Cube)
        );
    }

    #[test]
    fn test_ragged_contour_stays_unclassified() {
        // Low solidity fails every guard.
        assert_eq!(classify(&features(0.40, 0.55, 1.4, 9, 1.3)), None);
    }

    #[test]
    fn test_boundary_values_do_not_fire() {
        // Guards are strict inequalities; sitting exactly on a threshold
        // is a miss.
        let f = features(0.89, 0.94, 1.2, 12, 1.0);
        assert!(!is_circle(&f));
    }
}
