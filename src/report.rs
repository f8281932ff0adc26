//! Detection reporting protocol.
//!
//! The arm controller reads space-separated `color_shape:x,y` tokens
//! from stdout, at most three per frame, behind a `[DETECTIONS]` prefix.
//! Logs go to stderr so this stream stays machine-readable.

use shapescout_core::Detection;

/// Tokens reported per frame. The arm can only queue three pickups.
const REPORT_LIMIT: usize = 3;

/// Protocol line for one frame, `None` when nothing was detected.
pub fn format_detections(detections: &[Detection]) -> Option<String> {
    if detections.is_empty() {
        return None;
    }

    let tokens: Vec<String> = detections
        .iter()
        .take(REPORT_LIMIT)
        .map(|d| {
            format!(
                "{}_{}:{},{}",
                d.color.label(),
                d.shape.label(),
                d.center.0,
                d.center.1
            )
        })
        .collect();

    Some(format!("[DETECTIONS] {}", tokens.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapescout_core::{BoundingBox, Color, Shape};

    fn detection(color: Color, shape: Shape, center: (i32, i32)) -> Detection {
        Detection {
            color,
            shape,
            center,
            bbox: BoundingBox::new(0, 0, 50, 50),
            area: 2500.0,
            confidence: None,
        }
    }

    #[test]
    fn test_empty_frame_reports_nothing() {
        assert_eq!(format_detections(&[]), None);
    }

    #[test]
    fn test_single_detection_line() {
        let detections = [detection(Color::Red, Shape::Square, (320, 240))];
        assert_eq!(
            format_detections(&detections).as_deref(),
            Some("[DETECTIONS] red_square:320,240")
        );
    }

    #[test]
    fn test_reports_first_three_in_given_order() {
        let detections = [
            detection(Color::Black, Shape::Circle, (10, 11)),
            detection(Color::Red, Shape::Cube, (20, 21)),
            detection(Color::Blue, Shape::Pyramid, (30, 31)),
            detection(Color::Green, Shape::Cylinder, (40, 41)),
        ];
        assert_eq!(
            format_detections(&detections).as_deref(),
            Some("[DETECTIONS] black_circle:10,11 red_cube:20,21 blue_pyramid:30,31")
        );
    }

    #[test]
    fn test_negative_centroids_still_format() {
        // Should not happen for real contours, but the protocol must not
        // garble if it ever does.
        let detections = [detection(Color::Orange, Shape::Triangle, (-5, 7))];
        assert_eq!(
            format_detections(&detections).as_deref(),
            Some("[DETECTIONS] orange_triangle:-5,7")
        );
    }
}
