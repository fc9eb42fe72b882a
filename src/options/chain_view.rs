use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::metrics::MetricRef;
use crate::util::color::Color;

/// Angular gap left open at the top of the chain view, in radians.
const GAP_RADIANS: f64 = 0.35;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Chain View", inline)]
#[serde(default)]
/// Circular chain view layout and selection styling.
pub struct ChainViewOptions {
    /// Gap at the top of the ring, in degrees.
    #[schemars(title = "Gap Angle", range(min = 0.0, max = 90.0))]
    pub gap_degrees: f64,
    /// Center of the residue selector rotation.
    #[schemars(skip)]
    pub rotation_center: [f64; 2],
    /// Rings drawn from the inside out.
    #[schemars(skip)]
    pub rings: Vec<MetricRef>,
    /// Chain selector fill: `[unselected, selected]`.
    #[schemars(skip)]
    pub selector_colors: [Color; 2],
    /// Stroke and fill opacity of the selected residue's segment.
    #[schemars(title = "Highlight Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub highlight_opacity: f64,
}

impl Default for ChainViewOptions {
    fn default() -> Self {
        Self {
            gap_degrees: GAP_RADIANS.to_degrees(),
            rotation_center: [500.0, 500.0],
            rings: vec![
                MetricRef::Discrete(0),
                MetricRef::Discrete(1),
                MetricRef::Discrete(2),
                MetricRef::Continuous(0),
                MetricRef::Continuous(1),
                MetricRef::Continuous(4),
                MetricRef::Continuous(5),
            ],
            selector_colors: [Color::VERY_LIGHT_GREY, Color::CYAN],
            highlight_opacity: 0.25,
        }
    }
}

impl ChainViewOptions {
    /// Selector rotation for `residue` of a chain with `aligned_length`
    /// positions, in degrees.
    #[must_use]
    pub fn selector_angle(&self, residue: usize, aligned_length: usize) -> f64 {
        if aligned_length == 0 {
            return 0.0;
        }
        residue as f64 * (360.0 - self.gap_degrees) / aligned_length as f64
    }
}
