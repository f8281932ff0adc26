//! Color identities and their HSV segmentation profiles.
//!
//! Hue ranges follow the OpenCV convention (H in 0..=180, S and V in
//! 0..=255) and were tuned against the robot camera under workshop
//! lighting. Every bound here is inclusive.

use serde::{Deserialize, Serialize};

/// One inclusive HSV box, `lower[i] <= pixel[i] <= upper[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

/// Secondary per-pixel filter applied on top of the hue ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseFilter {
    /// Chromatic colors: drop washed-out and very dark pixels, which carry
    /// unreliable hue.
    Chromatic { min_saturation: u8, min_value: u8 },
    /// Black: keep a low-saturation dark band. The lower value bound
    /// excludes true black, which on this camera is dead pixels and the
    /// tray background rather than an object.
    Achromatic {
        max_saturation: u8,
        min_value: u8,
        max_value: u8,
    },
}

/// The closed set of colors the segmenter knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Black,
}

impl Color {
    /// Every color, colored ones first.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Orange,
        Color::Black,
    ];

    /// The chromatic colors in segmentation order. Black is not listed:
    /// it always runs as a separate final pass.
    pub const COLORED: [Color; 5] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Orange,
    ];

    /// Lowercase protocol label.
    pub fn label(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Black => "black",
        }
    }

    /// HSV ranges whose union selects this color. Red straddles the hue
    /// wraparound and needs two boxes; everything else needs one.
    pub fn hsv_ranges(&self) -> &'static [HsvRange] {
        match self {
            Color::Red => &[
                HsvRange {
                    lower: [0, 110, 90],
                    upper: [8, 255, 255],
                },
                HsvRange {
                    lower: [172, 110, 90],
                    upper: [180, 255, 255],
                },
            ],
            Color::Green => &[HsvRange {
                lower: [35, 80, 80],
                upper: [80, 255, 255],
            }],
            Color::Blue => &[HsvRange {
                lower: [95, 100, 80],
                upper: [125, 255, 255],
            }],
            Color::Yellow => &[HsvRange {
                lower: [22, 110, 110],
                upper: [34, 255, 255],
            }],
            Color::Orange => &[HsvRange {
                lower: [8, 130, 130],
                upper: [20, 255, 255],
            }],
            Color::Black => &[HsvRange {
                lower: [0, 0, 0],
                upper: [180, 255, 80],
            }],
        }
    }

    /// Per-pixel noise filter for this color's mask.
    pub fn noise_filter(&self) -> NoiseFilter {
        match self {
            Color::Black => NoiseFilter::Achromatic {
                max_saturation: 69,
                min_value: 9,
                max_value: 109,
            },
            _ => NoiseFilter::Chromatic {
                min_saturation: 65,
                min_value: 60,
            },
        }
    }

    /// Annotation color as RGB. Black detections draw in light gray so
    /// they stay visible on dark objects.
    pub fn draw_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Red => (255, 0, 0),
            Color::Green => (0, 255, 0),
            Color::Blue => (0, 0, 255),
            Color::Yellow => (255, 255, 0),
            Color::Orange => (255, 165, 0),
            Color::Black => (220, 220, 220),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
