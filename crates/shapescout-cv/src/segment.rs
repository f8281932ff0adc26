//! Per-color HSV segmentation.

use crate::Result;
use crate::config::{MorphParams, PreprocessParams};
use opencv::{
    core::{self, CV_8UC1, Mat, Point, Scalar, Size, Vector},
    imgproc,
    prelude::*,
};
use shapescout_core::{Color, NoiseFilter};

/// Turns a BGR frame into one binary mask per color.
///
/// Three stages: Gaussian blur plus HSV conversion with local contrast
/// equalization on the value channel, the color's HSV range union
/// intersected with its noise filter, then a morphological open/close
/// to drop speckle and fill reflection holes. The whole stage is a pure
/// function of the input frame.
pub struct ColorSegmenter {
    preprocess: PreprocessParams,
    morph: MorphParams,
}

impl ColorSegmenter {
    pub fn new(preprocess: PreprocessParams, morph: MorphParams) -> Self {
        Self { preprocess, morph }
    }

    /// Blur the frame, convert to HSV and equalize the value channel.
    ///
    /// CLAHE on V flattens shadows and uneven lighting without touching
    /// hue, so a single range table works across lighting conditions.
    pub fn preprocess(&self, frame: &Mat) -> Result<Mat> {
        let k = self.preprocess.blur_kernel;
        let mut blurred = Mat::default();
        imgproc::gaussian_blur(
            frame,
            &mut blurred,
            Size::new(k, k),
            0.0,
            0.0,
            core::BORDER_DEFAULT,
        )?;

        let mut hsv = Mat::default();
        imgproc::cvt_color(&blurred, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

        let mut channels = Vector::<Mat>::new();
        core::split(&hsv, &mut channels)?;

        let mut clahe = imgproc::create_clahe(
            self.preprocess.clahe_clip_limit,
            Size::new(
                self.preprocess.clahe_tile_size.0,
                self.preprocess.clahe_tile_size.1,
            ),
        )?;
        let value = channels.get(2)?;
        let mut equalized_value = Mat::default();
        clahe.apply(&value, &mut equalized_value)?;
        channels.set(2, equalized_value)?;

        let mut equalized = Mat::default();
        core::merge(&channels, &mut equalized)?;
        Ok(equalized)
    }

    /// Binary mask of one color over a preprocessed HSV frame.
    pub fn mask(&self, hsv: &Mat, color: Color) -> Result<Mat> {
        let mut mask = Mat::zeros(hsv.rows(), hsv.cols(), CV_8UC1)?.to_mat()?;
        for range in color.hsv_ranges() {
            let mut range_mask = Mat::default();
            core::in_range(
                hsv,
                &hsv_scalar(range.lower),
                &hsv_scalar(range.upper),
                &mut range_mask,
            )?;
            let mut merged = Mat::default();
            core::bitwise_or(&mask, &range_mask, &mut merged, &core::no_array())?;
            mask = merged;
        }

        let (band_lower, band_upper) = noise_band(color.noise_filter());
        let mut band = Mat::default();
        core::in_range(hsv, &band_lower, &band_upper, &mut band)?;
        let mut filtered = Mat::default();
        core::bitwise_and(&mask, &band, &mut filtered, &core::no_array())?;

        self.cleanup(&filtered)
    }

    /// Segment one color out of a raw BGR frame.
    pub fn segment(&self, frame: &Mat, color: Color) -> Result<Mat> {
        let hsv = self.preprocess(frame)?;
        self.mask(&hsv, color)
    }

    /// Morphological open then close with a large elliptical element.
    fn cleanup(&self, mask: &Mat) -> Result<Mat> {
        let kernel = imgproc::get_structuring_element(
            imgproc::MORPH_ELLIPSE,
            Size::new(self.morph.kernel_size, self.morph.kernel_size),
            Point::new(-1, -1),
        )?;
        let border = imgproc::morphology_default_border_value()?;

        let mut opened = Mat::default();
        imgproc::morphology_ex(
            mask,
            &mut opened,
            imgproc::MORPH_OPEN,
            &kernel,
            Point::new(-1, -1),
            self.morph.open_iterations,
            core::BORDER_CONSTANT,
            border,
        )?;

        let mut closed = Mat::default();
        imgproc::morphology_ex(
            &opened,
            &mut closed,
            imgproc::MORPH_CLOSE,
            &kernel,
            Point::new(-1, -1),
            self.morph.close_iterations,
            core::BORDER_CONSTANT,
            border,
        )?;
        Ok(closed)
    }
}

fn hsv_scalar(bound: [u8; 3]) -> Scalar {
    Scalar::new(bound[0] as f64, bound[1] as f64, bound[2] as f64, 0.0)
}

/// The noise filter expressed as an `in_range` band over full HSV.
fn noise_band(filter: NoiseFilter) -> (Scalar, Scalar) {
    match filter {
        NoiseFilter::Chromatic {
            min_saturation,
            min_value,
        } => (
            Scalar::new(0.0, min_saturation as f64, min_value as f64, 0.0),
            Scalar::new(180.0, 255.0, 255.0, 0.0),
        ),
        NoiseFilter::Achromatic {
            max_saturation,
            min_value,
            max_value,
        } => (
            Scalar::new(0.0, 0.0, min_value as f64, 0.0),
            Scalar::new(180.0, max_saturation as f64, max_value as f64, 0.0),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Rect};

    fn segmenter() -> ColorSegmenter {
        ColorSegmenter::new(PreprocessParams::default(), MorphParams::default())
    }

    fn white_frame(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(
            height,
            width,
            CV_8UC3,
            Scalar::new(255.0, 255.0, 255.0, 0.0),
        )
        .unwrap()
    }

    fn fill_rect(frame: &mut Mat, rect: Rect, bgr: (f64, f64, f64)) {
        imgproc::rectangle(
            frame,
            rect,
            Scalar::new(bgr.0, bgr.1, bgr.2, 0.0),
            -1,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
    }

    #[test]
    fn test_red_region_lands_only_in_red_mask() -> Result<()> {
        let mut frame = white_frame(640, 480);
        fill_rect(&mut frame, Rect::new(100, 100, 200, 200), (0.0, 0.0, 255.0));

        let segmenter = segmenter();
        let hsv = segmenter.preprocess(&frame)?;

        let red_pixels = core::count_non_zero(&segmenter.mask(&hsv, Color::Red)?)?;
        assert!(
            (28_000..=52_000).contains(&red_pixels),
            "red mask covers {red_pixels} px"
        );

        for color in Color::ALL {
            if color != Color::Red {
                let stray = core::count_non_zero(&segmenter.mask(&hsv, color)?)?;
                assert_eq!(stray, 0, "{color} mask not empty");
            }
        }
        Ok(())
    }

    #[test]
    fn test_white_frame_matches_nothing() -> Result<()> {
        let frame = white_frame(320, 240);
        let segmenter = segmenter();
        let hsv = segmenter.preprocess(&frame)?;
        for color in Color::ALL {
            assert_eq!(core::count_non_zero(&segmenter.mask(&hsv, color)?)?, 0);
        }
        Ok(())
    }

    #[test]
    fn test_true_black_background_is_not_an_object() -> Result<()> {
        let frame = Mat::new_rows_cols_with_default(
            480,
            640,
            CV_8UC3,
            Scalar::new(0.0, 0.0, 0.0, 0.0),
        )?;
        let mask = segmenter().segment(&frame, Color::Black)?;
        assert_eq!(core::count_non_zero(&mask)?, 0);
        Ok(())
    }

    #[test]
    fn test_dark_gray_is_black_object() -> Result<()> {
        let mut frame = white_frame(640, 480);
        fill_rect(&mut frame, Rect::new(200, 140, 200, 200), (40.0, 40.0, 40.0));
        let mask = segmenter().segment(&frame, Color::Black)?;
        let pixels = core::count_non_zero(&mask)?;
        assert!((28_000..=52_000).contains(&pixels), "black mask covers {pixels} px");
        Ok(())
    }

    #[test]
    fn test_segmentation_is_deterministic() -> Result<()> {
        let mut frame = white_frame(640, 480);
        fill_rect(&mut frame, Rect::new(80, 60, 220, 220), (0.0, 0.0, 255.0));

        let segmenter = segmenter();
        let first = segmenter.segment(&frame, Color::Red)?;
        let second = segmenter.segment(&frame, Color::Red)?;

        let mut diff = Mat::default();
        core::bitwise_xor(&first, &second, &mut diff, &core::no_array())?;
        assert_eq!(core::count_non_zero(&diff)?, 0);
        Ok(())
    }
}
