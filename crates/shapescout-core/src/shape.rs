//! Shape identities reported by the classifiers.

use serde::{Deserialize, Serialize};

/// The six solid shapes the robot is trained to pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Cube,
    Triangle,
    Pyramid,
    Cylinder,
}

impl Shape {
    /// Every shape, in model registration order.
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Square,
        Shape::Cube,
        Shape::Triangle,
        Shape::Pyramid,
        Shape::Cylinder,
    ];

    /// Lowercase protocol label.
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Cube => "cube",
            Shape::Triangle => "triangle",
            Shape::Pyramid => "pyramid",
            Shape::Cylinder => "cylinder",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
