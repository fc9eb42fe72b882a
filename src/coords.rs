//! Affine mapping from the percentile domain onto residue-view pixels.
//!
//! Calibration reads the bar-chart container polygon once: its first point
//! sits on the 100th-percentile edge and its third on the zero baseline.
//! The y axis is inverted, so larger percentiles map to smaller y.

use glam::DVec2;

use crate::error::IrisError;
use crate::summary::{DistributionSummary, PERCENTILE_MAX};

/// Round to one decimal place, matching the precision written into the
/// markup.
///
/// Rounds the exact decimal expansion of `value`, so `1.45` (stored just
/// below 1.45) gives `1.4` as `toFixed(1)` does.
#[must_use]
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Percentile value → y coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    offset: f64,
    multiplier: f64,
}

impl CoordinateMapper {
    /// Calibrate from the container's reference points. Needs at least
    /// three points (index 0 = top edge, index 2 = baseline).
    pub fn calibrate(points: &[DVec2]) -> Result<Self, IrisError> {
        let (Some(top), Some(baseline)) = (points.first(), points.get(2))
        else {
            return Err(IrisError::MissingGeometry(format!(
                "calibration needs 3 reference points, got {}",
                points.len()
            )));
        };
        Ok(Self {
            offset: baseline.y,
            multiplier: -(baseline.y - top.y) / PERCENTILE_MAX,
        })
    }

    /// y of the zero baseline.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Pixels per percentile point (negative: the axis is inverted).
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Map a percentile value to a y coordinate, rounded to one decimal.
    #[must_use]
    pub fn to_y(&self, value: f64) -> f64 {
        round1(self.offset + self.multiplier * value)
    }

    /// Map a whole summary into boxplot coordinates.
    #[must_use]
    pub fn boxplot(&self, summary: &DistributionSummary) -> BoxplotCoords {
        BoxplotCoords {
            min_y: self.to_y(summary.min),
            max_y: self.to_y(summary.max),
            low_y: self.to_y(summary.low),
            mean_y: self.to_y(summary.mean),
            high_y: self.to_y(summary.high),
        }
    }
}

/// A [`DistributionSummary`] in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxplotCoords {
    /// Bottom box edge.
    pub min_y: f64,
    /// Top box edge.
    pub max_y: f64,
    /// Lower deviation line.
    pub low_y: f64,
    /// Mean line.
    pub mean_y: f64,
    /// Upper deviation line.
    pub high_y: f64,
}

impl BoxplotCoords {
    /// The lower deviation line is drawn only when it falls below the box.
    #[must_use]
    pub fn low_line_visible(&self) -> bool {
        self.low_y > self.min_y
    }

    /// The upper deviation line is drawn only when it rises above the box.
    #[must_use]
    pub fn high_line_visible(&self) -> bool {
        self.high_y < self.max_y
    }

    /// Re-edge a four-point box polygon: points 0 and 3 move to the max
    /// edge, points 1 and 2 to the min edge. x coordinates are kept.
    #[must_use]
    pub fn box_polygon(&self, template: &[DVec2]) -> Vec<DVec2> {
        template
            .iter()
            .enumerate()
            .map(|(i, p)| match i {
                0 | 3 => DVec2::new(p.x, self.max_y),
                1 | 2 => DVec2::new(p.x, self.min_y),
                _ => *p,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default residue-view bar-chart container (top 240, bottom 940).
    fn container() -> Vec<DVec2> {
        vec![
            DVec2::new(35.0, 240.0),
            DVec2::new(400.0, 240.0),
            DVec2::new(400.0, 940.0),
            DVec2::new(35.0, 940.0),
        ]
    }

    #[test]
    fn calibration_reads_offset_and_multiplier() {
        let m = CoordinateMapper::calibrate(&container()).unwrap();
        assert_eq!(m.offset(), 940.0);
        assert_eq!(m.multiplier(), -7.0);
    }

    #[test]
    fn domain_ends_reproduce_reference_points() {
        let points = container();
        let m = CoordinateMapper::calibrate(&points).unwrap();
        assert_eq!(m.to_y(0.0), points[2].y);
        assert_eq!(m.to_y(100.0), points[0].y);
    }

    #[test]
    fn to_y_rounds_to_one_decimal() {
        let points = [
            DVec2::new(0.0, 10.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(0.0, 43.0),
        ];
        let m = CoordinateMapper::calibrate(&points).unwrap();
        // 43 - 0.33 * 33.3 = 32.011
        assert_eq!(m.to_y(33.3), 32.0);
    }

    #[test]
    fn rounding_uses_exact_decimal_value() {
        assert_eq!(round1(1.45), 1.4);
        assert_eq!(round1(-0.04), 0.0);
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.45),
        ];
        let m = CoordinateMapper::calibrate(&points).unwrap();
        assert_eq!(m.to_y(0.0), 1.4);
    }

    #[test]
    fn too_few_points_is_missing_geometry() {
        let err = CoordinateMapper::calibrate(&[DVec2::ZERO; 2]).unwrap_err();
        assert!(matches!(err, IrisError::MissingGeometry(_)));
    }

    #[test]
    fn deviation_lines_shown_outside_box() {
        let m = CoordinateMapper::calibrate(&container()).unwrap();
        let wide = m.boxplot(&DistributionSummary {
            min: 20.0,
            max: 80.0,
            low: 15.0,
            mean: 50.0,
            high: 90.0,
        });
        assert!(wide.low_line_visible());
        assert!(wide.high_line_visible());

        let narrow = m.boxplot(&DistributionSummary {
            min: 20.0,
            max: 80.0,
            low: 25.0,
            mean: 50.0,
            high: 75.0,
        });
        assert!(!narrow.low_line_visible());
        assert!(!narrow.high_line_visible());
    }

    #[test]
    fn box_polygon_moves_edges_and_keeps_x() {
        let m = CoordinateMapper::calibrate(&container()).unwrap();
        let coords = m.boxplot(&DistributionSummary {
            min: 0.0,
            max: 100.0,
            low: 10.0,
            mean: 50.0,
            high: 90.0,
        });
        let template = [
            DVec2::new(66.0, 320.0),
            DVec2::new(66.0, 860.0),
            DVec2::new(186.0, 860.0),
            DVec2::new(186.0, 320.0),
        ];
        let points = coords.box_polygon(&template);
        assert_eq!(points[0], DVec2::new(66.0, 240.0));
        assert_eq!(points[1], DVec2::new(66.0, 940.0));
        assert_eq!(points[2], DVec2::new(186.0, 940.0));
        assert_eq!(points[3], DVec2::new(186.0, 240.0));
    }
}
