//! Frame detection pipeline.

use crate::Result;
use crate::config::{ClassifierKind, DetectorConfig};
use crate::draw;
use crate::features::FeatureExtractor;
use crate::segment::ColorSegmenter;
use anyhow::Context;
use opencv::{
    core::{Mat, Point, Vector},
    imgcodecs, imgproc,
    prelude::*,
};
use serde::Serialize;
use shapescout_core::{BoundingBox, Color, Detection, prototype, rank_detections, rules};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Result of one frame pass.
#[derive(Debug)]
pub struct DetectionResult {
    /// Copy of the input frame, annotated when drawing is enabled.
    pub annotated: Mat,
    /// Accepted detections, area descending, capped.
    pub detections: Vec<Detection>,
    pub stats: FrameStats,
}

impl DetectionResult {
    /// Detections plus counters as pretty JSON. The annotated frame is
    /// not serialized.
    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            detections: &self.detections,
            stats: self.stats,
        };
        serde_json::to_string_pretty(&report).context("failed to serialize detections")
    }

    /// Write [`Self::to_json`] to a file.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    detections: &'a [Detection],
    stats: FrameStats,
}

/// Per-frame pipeline counters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FrameStats {
    /// Contours traced across all six masks.
    pub contours: usize,
    /// Contours rejected by the area or perimeter bounds.
    pub out_of_range: usize,
    /// Feature vectors no classifier accepted.
    pub unclassified: usize,
    /// Detections accepted before the per-frame cap.
    pub accepted: usize,
    pub processing_time_ms: u64,
}

/// Per-frame colored-solid detector.
///
/// Stateless across frames: every call to [`ShapeDetector::detect`] is a
/// pure function of the input frame, so results are reproducible and the
/// detector can be shared read-only between threads.
pub struct ShapeDetector {
    config: DetectorConfig,
    segmenter: ColorSegmenter,
    extractor: FeatureExtractor,
}

impl ShapeDetector {
    pub fn new(config: DetectorConfig) -> Self {
        let segmenter = ColorSegmenter::new(config.preprocess.clone(), config.morph.clone());
        let extractor = FeatureExtractor::new(&config);
        Self {
            config,
            segmenter,
            extractor,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect solids in one BGR frame.
    ///
    /// Colored passes run first and black runs last, so on overlapping
    /// candidates the colored detection is the one that survives an
    /// area tie. The final list is sorted by area descending and capped.
    pub fn detect(&self, frame: &Mat) -> Result<DetectionResult> {
        let start = Instant::now();

        let hsv = self
            .segmenter
            .preprocess(frame)
            .context("frame preprocessing failed")?;
        let mut annotated = frame.clone();
        let mut detections = Vec::new();
        let mut stats = FrameStats::default();

        for color in Color::COLORED {
            self.detect_color(&hsv, color, &mut annotated, &mut detections, &mut stats)?;
        }
        self.detect_color(&hsv, Color::Black, &mut annotated, &mut detections, &mut stats)?;

        rank_detections(&mut detections, self.config.max_detections);
        stats.processing_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            "frame: {} contours, {} accepted, {} returned, {}ms",
            stats.contours,
            stats.accepted,
            detections.len(),
            stats.processing_time_ms
        );

        Ok(DetectionResult {
            annotated,
            detections,
            stats,
        })
    }

    /// Detect solids in an image file.
    pub fn detect_from_file<P: AsRef<Path>>(&self, path: P) -> Result<DetectionResult> {
        let path = path.as_ref();
        let frame = imgcodecs::imread(
            path.to_str().context("image path is not valid UTF-8")?,
            imgcodecs::IMREAD_COLOR,
        )
        .with_context(|| format!("failed to load image {}", path.display()))?;
        anyhow::ensure!(!frame.empty(), "image {} is empty", path.display());
        self.detect(&frame)
    }

    /// One color's mask: trace contours, extract features, classify and
    /// collect detections.
    fn detect_color(
        &self,
        hsv: &Mat,
        color: Color,
        annotated: &mut Mat,
        detections: &mut Vec<Detection>,
        stats: &mut FrameStats,
    ) -> Result<()> {
        let mask = self
            .segmenter
            .mask(hsv, color)
            .with_context(|| format!("segmentation failed for {color}"))?;

        let mut contours = Vector::<Vector<Point>>::new();
        imgproc::find_contours(
            &mask,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )?;

        for i in 0..contours.len() {
            let contour = contours.get(i)?;
            stats.contours += 1;

            let features = match self.extractor.extract(&contour)? {
                Some(features) => features,
                None => {
                    stats.out_of_range += 1;
                    continue;
                }
            };

            let (shape, confidence) = match self.config.classifier {
                ClassifierKind::Rules => match rules::classify(&features) {
                    Some(shape) => (shape, None),
                    None => {
                        stats.unclassified += 1;
                        continue;
                    }
                },
                ClassifierKind::Prototype => match prototype::classify(&features) {
                    Some((shape, confidence)) => (shape, Some(confidence)),
                    None => {
                        stats.unclassified += 1;
                        continue;
                    }
                },
            };

            let moments = imgproc::moments(&contour, false)?;
            if moments.m00 == 0.0 {
                // A contour with no mass has no centroid to report.
                continue;
            }
            let center = (
                (moments.m10 / moments.m00) as i32,
                (moments.m01 / moments.m00) as i32,
            );

            let rect = imgproc::bounding_rect(&contour)?;
            let bbox = BoundingBox::new(rect.x, rect.y, rect.width, rect.height);

            if self.config.draw.enabled {
                draw::annotate(annotated, &contour, color, shape, &bbox, &self.config.draw)?;
            }

            detections.push(Detection {
                color,
                shape,
                center,
                bbox,
                area: features.area,
                confidence,
            });
            stats.accepted += 1;
        }

        Ok(())
    }
}
