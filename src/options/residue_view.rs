use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Residue View", inline)]
#[serde(default)]
/// Residue view badges, boxplot bars and value labels.
pub struct ResidueViewOptions {
    /// Discrete metric ids shown as badges.
    #[schemars(skip)]
    pub boxes: Vec<usize>,
    /// Continuous metric ids shown as boxplot bars.
    #[schemars(skip)]
    pub bars: Vec<usize>,
    /// Badge fill when the residue has no classification.
    #[schemars(skip)]
    pub na_color: Color,
    /// Badge text when the residue has no classification.
    #[schemars(title = "N/A Label")]
    pub na_label: String,
    /// Values below this put the label above the marker line.
    #[schemars(title = "Label Flip Threshold", range(min = 0.0, max = 100.0))]
    pub label_flip_threshold: f64,
    /// Label offset from the marker for values below the threshold.
    #[schemars(skip)]
    pub label_offset_low: f64,
    /// Label offset from the marker otherwise.
    #[schemars(skip)]
    pub label_offset: f64,
}

impl Default for ResidueViewOptions {
    fn default() -> Self {
        Self {
            boxes: vec![0, 1, 2],
            bars: vec![0, 5],
            na_color: Color::VERY_LIGHT_GREY,
            na_label: "N/A".to_owned(),
            label_flip_threshold: 10.0,
            label_offset_low: -10.0,
            label_offset: 25.0,
        }
    }
}

impl ResidueViewOptions {
    /// y of the value label for a marker drawn at `marker_y`.
    #[must_use]
    pub fn label_y(&self, value: f64, marker_y: f64) -> f64 {
        if value < self.label_flip_threshold {
            marker_y + self.label_offset_low
        } else {
            marker_y + self.label_offset
        }
    }
}
