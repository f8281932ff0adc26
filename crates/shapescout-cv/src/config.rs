//! Detection pipeline configuration.

use serde::{Deserialize, Serialize};

/// Which classifier the pipeline consults per contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Hand-tuned rule cascade; the production path.
    Rules,
    /// Nearest-prototype distances; detections carry a confidence.
    Prototype,
}

/// Main detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Contours at or below this area are noise.
    pub min_area: f64,
    /// Contours at or above this area are the tray or the table, not an
    /// object. Both area bounds are exclusive.
    pub max_area: f64,
    /// Minimum contour perimeter in pixels.
    pub min_perimeter: f64,
    /// Polygon simplification tolerance as a fraction of the perimeter.
    pub approx_epsilon_ratio: f64,
    /// Classifier consulted per contour.
    pub classifier: ClassifierKind,
    /// Cap on the detections returned per frame.
    pub max_detections: usize,
    pub preprocess: PreprocessParams,
    pub morph: MorphParams,
    pub draw: DrawParams,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_area: 1100.0,
            max_area: 400_000.0,
            min_perimeter: 50.0,
            approx_epsilon_ratio: 0.022,
            classifier: ClassifierKind::Rules,
            max_detections: 10,
            preprocess: PreprocessParams::default(),
            morph: MorphParams::default(),
            draw: DrawParams::default(),
        }
    }
}

impl DetectorConfig {
    /// Classify by prototype distance instead of the rule cascade.
    pub fn with_prototype_classifier() -> Self {
        Self {
            classifier: ClassifierKind::Prototype,
            ..Self::default()
        }
    }

    /// Headless operation: the returned frame is left unannotated.
    pub fn headless() -> Self {
        Self {
            draw: DrawParams {
                enabled: false,
                ..DrawParams::default()
            },
            ..Self::default()
        }
    }
}

/// Frame preprocessing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessParams {
    /// Gaussian blur kernel side, must be odd.
    pub blur_kernel: i32,
    /// CLAHE clip limit applied to the value channel.
    pub clahe_clip_limit: f64,
    /// CLAHE tile grid size.
    pub clahe_tile_size: (i32, i32),
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            blur_kernel: 9,
            clahe_clip_limit: 4.0,
            clahe_tile_size: (8, 8),
        }
    }
}

/// Morphological mask cleanup parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphParams {
    /// Side of the elliptical structuring element.
    pub kernel_size: i32,
    /// Opening iterations, removes speckle and glare islands.
    pub open_iterations: i32,
    /// Closing iterations, fills holes from reflections.
    pub close_iterations: i32,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            kernel_size: 17,
            open_iterations: 5,
            close_iterations: 6,
        }
    }
}

/// Annotation parameters, sized for a 640x480 preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawParams {
    pub enabled: bool,
    pub box_thickness: i32,
    pub font_scale: f64,
    pub text_thickness: i32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            enabled: true,
            box_thickness: 8,
            font_scale: 1.8,
            text_thickness: 5,
        }
    }
}
