//! Detection annotation drawing.

use crate::Result;
use crate::config::DrawParams;
use opencv::{
    core::{Mat, Point, Point2f, Scalar, Vector},
    imgproc,
};
use shapescout_core::{BoundingBox, Color, Shape};

/// Draw the oriented box and `COLOR SHAPE` caption for one detection.
pub fn annotate(
    frame: &mut Mat,
    contour: &Vector<Point>,
    color: Color,
    shape: Shape,
    bbox: &BoundingBox,
    params: &DrawParams,
) -> Result<()> {
    let scalar = bgr_scalar(color);

    // The oriented rect hugs tilted objects better than the bbox does.
    // RotatedRect::points fills a fixed array directly; the Mat-based
    // box_points binding trips an input-array assertion.
    let rect = imgproc::min_area_rect(contour)?;
    let mut corners = [Point2f::default(); 4];
    rect.points(&mut corners)?;

    let mut outline = Vector::<Point>::new();
    for corner in corners {
        outline.push(Point::new(corner.x.round() as i32, corner.y.round() as i32));
    }
    let mut polygons = Vector::<Vector<Point>>::new();
    polygons.push(outline);
    imgproc::polylines(
        frame,
        &polygons,
        true,
        scalar,
        params.box_thickness,
        imgproc::LINE_8,
        0,
    )?;

    let caption = format!(
        "{} {}",
        color.label().to_uppercase(),
        shape.label().to_uppercase()
    );
    imgproc::put_text(
        frame,
        &caption,
        Point::new(bbox.x, bbox.y - 30),
        imgproc::FONT_HERSHEY_DUPLEX,
        params.font_scale,
        scalar,
        params.text_thickness,
        imgproc::LINE_8,
        false,
    )?;

    Ok(())
}

/// Annotation color as a BGR scalar.
fn bgr_scalar(color: Color) -> Scalar {
    let (r, g, b) = color.draw_rgb();
    Scalar::new(b as f64, g as f64, r as f64, 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{self, CV_8UC3};

    #[test]
    fn test_annotate_touches_the_frame() -> Result<()> {
        let mut frame = Mat::new_rows_cols_with_default(
            480,
            640,
            CV_8UC3,
            Scalar::new(0.0, 0.0, 0.0, 0.0),
        )?;
        let contour = Vector::from_iter([
            Point::new(200, 200),
            Point::new(300, 200),
            Point::new(300, 300),
            Point::new(200, 300),
        ]);
        annotate(
            &mut frame,
            &contour,
            Color::Green,
            Shape::Square,
            &BoundingBox::new(200, 200, 100, 100),
            &DrawParams::default(),
        )?;

        let mut gray = Mat::default();
        imgproc::cvt_color(&frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;
        assert!(core::count_non_zero(&gray)? > 0);
        Ok(())
    }

    #[test]
    fn test_black_draws_in_visible_gray() {
        let scalar = bgr_scalar(Color::Black);
        assert_eq!((scalar[0], scalar[1], scalar[2]), (220.0, 220.0, 220.0));
    }
}
