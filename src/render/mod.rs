//! The render-target contract.
//!
//! The panel never owns markup. It addresses elements of the generated
//! report by [`ElementId`] and pushes visual properties through the
//! [`RenderTarget`] trait. The only read is [`RenderTarget::polygon_points`],
//! used when the panel calibrates against the drawn geometry.

#[cfg(feature = "web")]
pub mod dom;
pub mod recording;

use std::fmt;

use glam::DVec2;

use crate::util::color::Color;

/// Which deviation line of a boxplot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxplotLine {
    /// `mean - sigma`.
    Low,
    /// `mean`.
    Mid,
    /// `mean + sigma`.
    High,
}

impl BoxplotLine {
    /// All lines in summary order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Mid, Self::High];

    fn suffix(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

/// Stable address of one element in the report markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Residue number and code heading.
    ResidueSummary,
    /// Chain selector button background.
    ChainSelector {
        /// Chain index.
        chain: usize,
    },
    /// Version switch knob slide animation.
    SwitchMoveAnimation {
        /// Target version.
        version: usize,
    },
    /// Version switch color animation.
    SwitchColorAnimation {
        /// Target version.
        version: usize,
    },
    /// Whole chain view container.
    ChainView {
        /// Chain index.
        chain: usize,
    },
    /// Rotating residue selector pointer.
    ResidueSelector {
        /// Chain index.
        chain: usize,
    },
    /// Transparent hit area for one residue.
    InteractionSegment {
        /// Chain index.
        chain: usize,
        /// Residue position.
        residue: usize,
    },
    /// Missing-residue shading for one version.
    Shade {
        /// Chain index.
        chain: usize,
        /// Model version.
        version: usize,
    },
    /// Discrete ring segments for one version.
    DiscreteGroup {
        /// Chain index.
        chain: usize,
        /// Model version.
        version: usize,
        /// Ring position.
        ring: usize,
    },
    /// Continuous ring line reveal animation for one version.
    RingAnimation {
        /// Chain index.
        chain: usize,
        /// Model version.
        version: usize,
        /// Ring position.
        ring: usize,
    },
    /// Residue-view bar chart frame, the calibration reference.
    BarChartsContainer,
    /// Discrete badge background.
    Badge {
        /// Badge position.
        index: usize,
    },
    /// Discrete badge label.
    BadgeText {
        /// Badge position.
        index: usize,
    },
    /// Boxplot group.
    Boxplot {
        /// Bar position.
        bar: usize,
    },
    /// Boxplot min/max box polygon.
    BoxplotBox {
        /// Bar position.
        bar: usize,
    },
    /// Boxplot deviation line.
    BoxplotLine {
        /// Bar position.
        bar: usize,
        /// Which line.
        line: BoxplotLine,
    },
    /// Selected residue marker line.
    BarMainline {
        /// Bar position.
        bar: usize,
    },
    /// Selected residue value label.
    BarLabel {
        /// Bar position.
        bar: usize,
    },
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PANEL: &str = "iris-panel";
        const CHAIN: &str = "iris-chain-view";
        const RESIDUE: &str = "iris-residue-view";
        match *self {
            Self::ResidueSummary => write!(f, "{PANEL}-residue-summary"),
            Self::ChainSelector { chain } => {
                write!(f, "{PANEL}-chain-selector-{chain}")
            }
            Self::SwitchMoveAnimation { version } => {
                write!(f, "{PANEL}-switch-move-animation-{version}")
            }
            Self::SwitchColorAnimation { version } => {
                write!(f, "{PANEL}-switch-color-animation-{version}")
            }
            Self::ChainView { chain } => write!(f, "{CHAIN}-{chain}"),
            Self::ResidueSelector { chain } => {
                write!(f, "{CHAIN}-{chain}-residue-selector")
            }
            Self::InteractionSegment { chain, residue } => {
                write!(f, "{CHAIN}-{chain}-interaction-segment-{residue}")
            }
            Self::Shade { chain, version } => {
                write!(f, "{CHAIN}-{chain}-shade-{version}")
            }
            Self::DiscreteGroup {
                chain,
                version,
                ring,
            } => write!(f, "{CHAIN}-{chain}-discrete-{version}-{ring}"),
            Self::RingAnimation {
                chain,
                version,
                ring,
            } => write!(f, "{CHAIN}-{chain}-animation-{version}-{ring}"),
            Self::BarChartsContainer => {
                write!(f, "{RESIDUE}-bar-charts-container")
            }
            Self::Badge { index } => write!(f, "{RESIDUE}-box-{index}"),
            Self::BadgeText { index } => {
                write!(f, "{RESIDUE}-box-{index}-text")
            }
            Self::Boxplot { bar } => write!(f, "{RESIDUE}-boxplot-{bar}"),
            Self::BoxplotBox { bar } => {
                write!(f, "{RESIDUE}-boxplot-{bar}-box")
            }
            Self::BoxplotLine { bar, line } => {
                write!(f, "{RESIDUE}-boxplot-{bar}-line-{}", line.suffix())
            }
            Self::BarMainline { bar } => {
                write!(f, "{RESIDUE}-bar-{bar}-mainline")
            }
            Self::BarLabel { bar } => write!(f, "{RESIDUE}-bar-{bar}-label"),
        }
    }
}

/// A rotation in degrees about a fixed center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Clockwise angle in degrees.
    pub degrees: f64,
    /// Rotation center.
    pub center: DVec2,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotate({}, {}, {})",
            self.degrees, self.center.x, self.center.y
        )
    }
}

/// Everything the panel can do to the drawn report.
///
/// Implementations should treat an unknown element as a no-op; the panel
/// addresses some optional elements (e.g. ring animations of rings that
/// had no data) that a given report may not contain.
pub trait RenderTarget {
    /// Set group/element opacity.
    fn set_opacity(&mut self, id: ElementId, opacity: f64);
    /// Set stroke and fill opacity together.
    fn set_paint_opacity(&mut self, id: ElementId, opacity: f64);
    /// Set fill color.
    fn set_fill(&mut self, id: ElementId, color: Color);
    /// Set a rotation transform.
    fn set_transform(&mut self, id: ElementId, rotation: Rotation);
    /// Replace text content.
    fn set_text(&mut self, id: ElementId, text: &str);
    /// Set both y endpoints of a horizontal line.
    fn set_line_endpoints(&mut self, id: ElementId, y1: f64, y2: f64);
    /// Set the y position of a text element.
    fn set_y(&mut self, id: ElementId, y: f64);
    /// Replace a polygon's points.
    fn set_polygon_points(&mut self, id: ElementId, points: &[DVec2]);
    /// Show or hide an element entirely.
    fn set_displayed(&mut self, id: ElementId, displayed: bool);
    /// Restart an element's reveal animation.
    fn trigger_reveal_animation(&mut self, id: ElementId);
    /// Read a polygon's current points, if the element exists.
    fn polygon_points(&self, id: ElementId) -> Option<Vec<DVec2>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_match_markup() {
        let cases = [
            (ElementId::ResidueSummary, "iris-panel-residue-summary"),
            (
                ElementId::ChainSelector { chain: 2 },
                "iris-panel-chain-selector-2",
            ),
            (
                ElementId::SwitchColorAnimation { version: 1 },
                "iris-panel-switch-color-animation-1",
            ),
            (ElementId::ChainView { chain: 0 }, "iris-chain-view-0"),
            (
                ElementId::InteractionSegment { chain: 1, residue: 17 },
                "iris-chain-view-1-interaction-segment-17",
            ),
            (
                ElementId::DiscreteGroup {
                    chain: 0,
                    version: 1,
                    ring: 2,
                },
                "iris-chain-view-0-discrete-1-2",
            ),
            (
                ElementId::RingAnimation {
                    chain: 3,
                    version: 0,
                    ring: 5,
                },
                "iris-chain-view-3-animation-0-5",
            ),
            (
                ElementId::BarChartsContainer,
                "iris-residue-view-bar-charts-container",
            ),
            (ElementId::BadgeText { index: 1 }, "iris-residue-view-box-1-text"),
            (
                ElementId::BoxplotLine {
                    bar: 0,
                    line: BoxplotLine::High,
                },
                "iris-residue-view-boxplot-0-line-high",
            ),
            (ElementId::BarLabel { bar: 1 }, "iris-residue-view-bar-1-label"),
        ];
        for (id, expected) in cases {
            assert_eq!(id.to_string(), expected);
        }
    }

    #[test]
    fn rotation_renders_as_svg_transform() {
        let r = Rotation {
            degrees: 12.5,
            center: DVec2::new(500.0, 500.0),
        };
        assert_eq!(r.to_string(), "rotate(12.5, 500, 500)");
    }
}
