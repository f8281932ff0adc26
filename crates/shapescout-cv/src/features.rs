//! Contour feature extraction.

use crate::Result;
use crate::config::DetectorConfig;
use opencv::{
    core::{Point, Vector},
    imgproc,
    prelude::*,
};
use shapescout_core::{DEFAULT_ELLIPSE_RATIO, Features};

/// Computes the geometric descriptor set for candidate contours.
pub struct FeatureExtractor {
    min_area: f64,
    max_area: f64,
    min_perimeter: f64,
    approx_epsilon_ratio: f64,
}

impl FeatureExtractor {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            min_area: config.min_area,
            max_area: config.max_area,
            min_perimeter: config.min_perimeter,
            approx_epsilon_ratio: config.approx_epsilon_ratio,
        }
    }

    /// Descriptors for one contour, or `None` when the contour is too
    /// small, too large or too short to be a candidate object.
    pub fn extract(&self, contour: &Vector<Point>) -> Result<Option<Features>> {
        let area = imgproc::contour_area(contour, false)?;
        if area <= self.min_area || area >= self.max_area {
            return Ok(None);
        }

        let perimeter = imgproc::arc_length(contour, true)?;
        if perimeter < self.min_perimeter {
            return Ok(None);
        }

        let circularity = 4.0 * std::f64::consts::PI * area / (perimeter * perimeter);

        let mut hull = Vector::<Point>::new();
        imgproc::convex_hull(contour, &mut hull, false, true)?;
        let hull_area = imgproc::contour_area(&hull, false)?;
        let solidity = if hull_area > 0.0 { area / hull_area } else { 0.0 };

        let mut approx = Vector::<Point>::new();
        imgproc::approx_poly_dp(
            contour,
            &mut approx,
            self.approx_epsilon_ratio * perimeter,
            true,
        )?;
        let vertices = approx.len();

        let rect = imgproc::bounding_rect(contour)?;
        let aspect_ratio =
            rect.width.max(rect.height) as f64 / rect.width.min(rect.height) as f64;

        let ellipse_ratio = fit_ellipse_ratio(contour).unwrap_or(DEFAULT_ELLIPSE_RATIO);

        Ok(Some(Features {
            area,
            circularity,
            solidity,
            ellipse_ratio,
            vertices,
            aspect_ratio,
        }))
    }
}

/// Axis ratio of the best-fit ellipse, or `None` when the contour has
/// fewer than five points or the fit degenerates.
fn fit_ellipse_ratio(contour: &Vector<Point>) -> Option<f64> {
    if contour.len() < 5 {
        return None;
    }
    let ellipse = imgproc::fit_ellipse(contour).ok()?;
    let width = ellipse.size.width as f64;
    let height = ellipse.size.height as f64;
    let (major, minor) = if width >= height {
        (width, height)
    } else {
        (height, width)
    };
    if minor <= 0.0 {
        return None;
    }
    Some(major / minor)
}
