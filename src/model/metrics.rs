//! The fixed metric catalogue and its resolution into a panel layout.
//!
//! Continuous metrics are percentile-ranked scores drawn as boxplot bars
//! and chain-view line rings. Discrete metrics are categorical
//! classifications drawn as colored badges and segmented rings; their
//! values index into `seq_colors` / `seq_labels`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{IndexKind, IrisError};
use crate::util::color::Color;

/// Optional analysis that a metric depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// MolProbity clash/geometry analysis.
    MolProbity,
    /// Covariance-based contact prediction.
    Covariance,
    /// Experimental reflection data.
    Reflections,
}

/// Which optional data sources the loaded model carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Availability {
    /// MolProbity results present.
    pub molprobity: bool,
    /// Covariance results present.
    pub covariance: bool,
    /// Reflection-derived results present.
    pub reflections: bool,
}

impl Availability {
    /// Whether a metric requiring `source` can be shown.
    #[must_use]
    pub fn satisfies(self, source: Option<DataSource>) -> bool {
        match source {
            None => true,
            Some(DataSource::MolProbity) => self.molprobity,
            Some(DataSource::Covariance) => self.covariance,
            Some(DataSource::Reflections) => self.reflections,
        }
    }
}

/// A percentile-ranked continuous score.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousMetric {
    /// Index into `percentile_values`.
    pub id: usize,
    /// Name shown under boxplot bars.
    pub long_name: &'static str,
    /// Name shown on chain-view rings.
    pub short_name: &'static str,
    /// Chain-view ring color.
    pub ring_color: Color,
    /// `-1` when lower raw values are better.
    pub polarity: i8,
    /// Required analysis, if any.
    pub requires: Option<DataSource>,
}

/// A categorical classification with a fixed color/label table.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteMetric {
    /// Index into `discrete_values`.
    pub id: usize,
    /// Full name.
    pub long_name: &'static str,
    /// Name shown beside residue-view badges and on rings.
    pub short_name: &'static str,
    /// Chain-view ring axis color.
    pub ring_color: Color,
    /// Badge color per discrete index (worst first).
    pub seq_colors: &'static [Color],
    /// Badge label per discrete index (worst first).
    pub seq_labels: &'static [&'static str],
    /// Required analysis, if any.
    pub requires: Option<DataSource>,
}

impl DiscreteMetric {
    /// Color and label for a discrete index, or `None` when the index is
    /// outside the table.
    #[must_use]
    pub fn classify(&self, index: usize) -> Option<(Color, &'static str)> {
        Some((*self.seq_colors.get(index)?, *self.seq_labels.get(index)?))
    }
}

const TRAFFIC_LIGHT: &[Color] = &[Color::RED, Color::ORANGE, Color::GREEN];

/// Continuous metrics, indexed by id.
pub static CONTINUOUS_METRICS: [ContinuousMetric; 6] = [
    ContinuousMetric {
        id: 0,
        long_name: "Avg. B-factor",
        short_name: "Avg. B",
        ring_color: Color::CYAN,
        polarity: -1,
        requires: None,
    },
    ContinuousMetric {
        id: 1,
        long_name: "Max. B-factor",
        short_name: "Max. B",
        ring_color: Color::TEAL,
        polarity: -1,
        requires: None,
    },
    ContinuousMetric {
        id: 2,
        long_name: "Std. B-factor",
        short_name: "Std. B",
        ring_color: Color::SLATE,
        polarity: -1,
        requires: None,
    },
    ContinuousMetric {
        id: 3,
        long_name: "Residue Fit",
        short_name: "Res. Fit",
        ring_color: Color::MAGENTA,
        polarity: -1,
        requires: None,
    },
    ContinuousMetric {
        id: 4,
        long_name: "Main Chain Fit",
        short_name: "M.C. Fit",
        ring_color: Color::BLUE,
        polarity: -1,
        requires: None,
    },
    ContinuousMetric {
        id: 5,
        long_name: "Side Chain Fit",
        short_name: "S.C. Fit",
        ring_color: Color::INDIGO,
        polarity: -1,
        requires: None,
    },
];

/// Discrete metrics, indexed by id.
pub static DISCRETE_METRICS: [DiscreteMetric; 3] = [
    DiscreteMetric {
        id: 0,
        long_name: "Rotamer Classification",
        short_name: "Rota.",
        ring_color: Color::LIGHT_GREY,
        seq_colors: TRAFFIC_LIGHT,
        seq_labels: &["Outlier", "Allowed", "Favoured"],
        requires: None,
    },
    DiscreteMetric {
        id: 1,
        long_name: "Ramachandran Classification",
        short_name: "Rama.",
        ring_color: Color::LIGHT_GREY,
        seq_colors: TRAFFIC_LIGHT,
        seq_labels: &["Outlier", "Allowed", "Favoured"],
        requires: None,
    },
    DiscreteMetric {
        id: 2,
        long_name: "Clash Indicator",
        short_name: "Clashes",
        ring_color: Color::LIGHT_GREY,
        seq_colors: TRAFFIC_LIGHT,
        seq_labels: &["Multiple Clashes", "One Clash", "No Clashes"],
        requires: Some(DataSource::MolProbity),
    },
];

/// Continuous metric by id.
pub fn continuous(id: usize) -> Result<&'static ContinuousMetric, IrisError> {
    CONTINUOUS_METRICS.get(id).ok_or_else(|| {
        IrisError::out_of_range(IndexKind::Metric, id, CONTINUOUS_METRICS.len())
    })
}

/// Discrete metric by id.
pub fn discrete(id: usize) -> Result<&'static DiscreteMetric, IrisError> {
    DISCRETE_METRICS.get(id).ok_or_else(|| {
        IrisError::out_of_range(IndexKind::Metric, id, DISCRETE_METRICS.len())
    })
}

/// Reference to a catalogue metric, used in option layouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricRef {
    /// Continuous metric id.
    Continuous(usize),
    /// Discrete metric id.
    Discrete(usize),
}

impl MetricRef {
    /// Short name and ring axis color of the referenced metric.
    pub fn appearance(self) -> Result<(&'static str, Color), IrisError> {
        Ok(match self {
            Self::Continuous(id) => {
                let m = continuous(id)?;
                (m.short_name, m.ring_color)
            }
            Self::Discrete(id) => {
                let m = discrete(id)?;
                (m.short_name, m.ring_color)
            }
        })
    }

    fn requires(self) -> Result<Option<DataSource>, IrisError> {
        Ok(match self {
            Self::Continuous(id) => continuous(id)?.requires,
            Self::Discrete(id) => discrete(id)?.requires,
        })
    }
}

/// The metrics actually drawn, after dropping those whose data source is
/// missing. Positions in these lists are the element indices used in the
/// markup (`ring`, `box`, `bar`).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLayout {
    /// Chain-view rings, innermost first.
    pub rings: Vec<MetricRef>,
    /// Residue-view discrete badges.
    pub boxes: Vec<&'static DiscreteMetric>,
    /// Residue-view boxplot bars.
    pub bars: Vec<&'static ContinuousMetric>,
}

impl MetricLayout {
    /// Resolve ids against the catalogue and filter by availability.
    pub fn resolve(
        rings: &[MetricRef],
        boxes: &[usize],
        bars: &[usize],
        availability: Availability,
    ) -> Result<Self, IrisError> {
        let mut kept_rings = Vec::with_capacity(rings.len());
        for &ring in rings {
            if availability.satisfies(ring.requires()?) {
                kept_rings.push(ring);
            }
        }

        let mut kept_boxes = Vec::with_capacity(boxes.len());
        for &id in boxes {
            let metric = discrete(id)?;
            if availability.satisfies(metric.requires) {
                kept_boxes.push(metric);
            } else {
                log::debug!("dropping badge '{}': no data", metric.long_name);
            }
        }

        let mut kept_bars = Vec::with_capacity(bars.len());
        for &id in bars {
            let metric = continuous(id)?;
            if availability.satisfies(metric.requires) {
                kept_bars.push(metric);
            } else {
                log::debug!("dropping bar '{}': no data", metric.long_name);
            }
        }

        Ok(Self {
            rings: kept_rings,
            boxes: kept_boxes,
            bars: kept_bars,
        })
    }

    /// One human-readable line per drawn metric: rings with their axis
    /// colors, then badges, then bars with their polarity.
    #[must_use]
    pub fn legend(&self) -> Vec<String> {
        let rings = self.rings.iter().enumerate().filter_map(|(ring, m)| {
            let (name, color) = m.appearance().ok()?;
            Some(format!("ring {ring}: {name} {color}"))
        });
        let boxes = self.boxes.iter().enumerate().map(|(index, m)| {
            format!("badge {index}: {} ({})", m.long_name, m.short_name)
        });
        let bars = self.bars.iter().enumerate().map(|(bar, m)| {
            let polarity = if m.polarity < 0 { "lower" } else { "higher" };
            format!(
                "bar {bar}: {}, {polarity} raw values are better",
                m.long_name
            )
        });
        rings.chain(boxes).chain(bars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RINGS: [MetricRef; 7] = [
        MetricRef::Discrete(0),
        MetricRef::Discrete(1),
        MetricRef::Discrete(2),
        MetricRef::Continuous(0),
        MetricRef::Continuous(1),
        MetricRef::Continuous(4),
        MetricRef::Continuous(5),
    ];

    #[test]
    fn catalogue_ids_match_positions() {
        for (i, m) in CONTINUOUS_METRICS.iter().enumerate() {
            assert_eq!(m.id, i);
        }
        for (i, m) in DISCRETE_METRICS.iter().enumerate() {
            assert_eq!(m.id, i);
            assert_eq!(m.seq_colors.len(), m.seq_labels.len());
        }
    }

    #[test]
    fn classify_maps_index_through_tables() {
        let clash = discrete(2).unwrap();
        assert_eq!(clash.classify(1), Some((Color::ORANGE, "One Clash")));
        assert_eq!(clash.classify(3), None);
    }

    #[test]
    fn molprobity_metrics_dropped_without_molprobity() {
        let layout =
            MetricLayout::resolve(&RINGS, &[0, 1, 2], &[0, 5], Availability::default())
                .unwrap();
        assert_eq!(layout.rings.len(), 6);
        assert!(!layout.rings.contains(&MetricRef::Discrete(2)));
        assert_eq!(layout.boxes.len(), 2);
        assert_eq!(layout.bars.len(), 2);
    }

    #[test]
    fn molprobity_metrics_kept_with_molprobity() {
        let availability = Availability {
            molprobity: true,
            ..Availability::default()
        };
        let layout =
            MetricLayout::resolve(&RINGS, &[0, 1, 2], &[0, 5], availability)
                .unwrap();
        assert_eq!(layout.rings.len(), 7);
        assert_eq!(layout.boxes[2].short_name, "Clashes");
    }

    #[test]
    fn legend_lists_rings_badges_and_bars() {
        let availability = Availability {
            molprobity: true,
            ..Availability::default()
        };
        let layout =
            MetricLayout::resolve(&RINGS, &[0, 1, 2], &[0, 5], availability)
                .unwrap();
        let legend = layout.legend();
        assert_eq!(legend.len(), 7 + 3 + 2);
        assert_eq!(legend[0], "ring 0: Rota. rgb(150, 150, 150)");
        assert_eq!(legend[3], "ring 3: Avg. B rgb(50, 200, 200)");
        assert_eq!(legend[9], "badge 2: Clash Indicator (Clashes)");
        assert_eq!(
            legend[11],
            "bar 1: Side Chain Fit, lower raw values are better"
        );
        assert_eq!(
            MetricRef::Discrete(7).appearance().unwrap_err().to_string(),
            "metric index 7 out of range (0..3)"
        );
    }

    #[test]
    fn unknown_metric_id_is_rejected() {
        let err = MetricLayout::resolve(&[], &[], &[9], Availability::default())
            .unwrap_err();
        assert!(matches!(
            err,
            IrisError::OutOfRange { kind: IndexKind::Metric, index: 9, .. }
        ));
    }
}
