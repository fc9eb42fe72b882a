//! In-memory render target that keeps the last value written to every
//! element. Backs the headless binary and the test suite.

use glam::DVec2;
use rustc_hash::FxHashMap;

use super::{ElementId, RenderTarget, Rotation};
use crate::util::color::Color;

/// Last-written visual state of one element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementState {
    /// Group/element opacity.
    pub opacity: Option<f64>,
    /// Combined stroke and fill opacity.
    pub paint_opacity: Option<f64>,
    /// Fill color.
    pub fill: Option<Color>,
    /// Rotation transform.
    pub transform: Option<Rotation>,
    /// Text content.
    pub text: Option<String>,
    /// Line endpoints `(y1, y2)`.
    pub line_y: Option<(f64, f64)>,
    /// Text y position.
    pub y: Option<f64>,
    /// Polygon points.
    pub points: Option<Vec<DVec2>>,
    /// Display toggle.
    pub displayed: Option<bool>,
    /// How many times the reveal animation was started.
    pub reveals: usize,
}

/// A [`RenderTarget`] that records element state instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    elements: FxHashMap<ElementId, ElementState>,
    writes: usize,
}

impl RecordingTarget {
    /// An empty target with no geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the geometry of the default 400 x 1000 residue view: the
    /// bar-chart container and one boxplot box per bar.
    #[must_use]
    pub fn with_residue_view(num_boxes: usize, num_bars: usize) -> Self {
        const WIDTH: f64 = 400.0;
        const HEIGHT: f64 = 1000.0;
        const LEFT_INDENT: f64 = 35.0;
        const HALF_BAR: f64 = 60.0;

        let top = 70.0 * num_boxes as f64 + 30.0;
        let bottom = HEIGHT - 60.0;
        let mut target = Self::new().with_polygon(
            ElementId::BarChartsContainer,
            vec![
                DVec2::new(LEFT_INDENT, top),
                DVec2::new(WIDTH, top),
                DVec2::new(WIDTH, bottom),
                DVec2::new(LEFT_INDENT, bottom),
            ],
        );

        let chart_width = WIDTH - LEFT_INDENT;
        for bar in 0..num_bars {
            let x = LEFT_INDENT + chart_width * (2 * bar + 1) as f64 / 4.0;
            target = target.with_polygon(
                ElementId::BoxplotBox { bar },
                vec![
                    DVec2::new(x - HALF_BAR, top + 80.0),
                    DVec2::new(x - HALF_BAR, bottom - 80.0),
                    DVec2::new(x + HALF_BAR, bottom - 80.0),
                    DVec2::new(x + HALF_BAR, top + 80.0),
                ],
            );
        }
        target
    }

    /// Seed one polygon's points.
    #[must_use]
    pub fn with_polygon(mut self, id: ElementId, points: Vec<DVec2>) -> Self {
        self.entry(id).points = Some(points);
        self
    }

    /// State of `id`, if anything was ever written to it.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    /// Total property writes received.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn entry(&mut self, id: ElementId) -> &mut ElementState {
        self.elements.entry(id).or_default()
    }

    fn write(&mut self, id: ElementId) -> &mut ElementState {
        self.writes += 1;
        self.entry(id)
    }
}

impl RenderTarget for RecordingTarget {
    fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        log::trace!("{id}: opacity={opacity}");
        self.write(id).opacity = Some(opacity);
    }

    fn set_paint_opacity(&mut self, id: ElementId, opacity: f64) {
        log::trace!("{id}: stroke/fill-opacity={opacity}");
        self.write(id).paint_opacity = Some(opacity);
    }

    fn set_fill(&mut self, id: ElementId, color: Color) {
        log::trace!("{id}: fill={color}");
        self.write(id).fill = Some(color);
    }

    fn set_transform(&mut self, id: ElementId, rotation: Rotation) {
        log::trace!("{id}: transform={rotation}");
        self.write(id).transform = Some(rotation);
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        log::trace!("{id}: text={text:?}");
        self.write(id).text = Some(text.to_owned());
    }

    fn set_line_endpoints(&mut self, id: ElementId, y1: f64, y2: f64) {
        log::trace!("{id}: y1={y1} y2={y2}");
        self.write(id).line_y = Some((y1, y2));
    }

    fn set_y(&mut self, id: ElementId, y: f64) {
        log::trace!("{id}: y={y}");
        self.write(id).y = Some(y);
    }

    fn set_polygon_points(&mut self, id: ElementId, points: &[DVec2]) {
        log::trace!("{id}: {} points", points.len());
        self.write(id).points = Some(points.to_vec());
    }

    fn set_displayed(&mut self, id: ElementId, displayed: bool) {
        log::trace!("{id}: displayed={displayed}");
        self.write(id).displayed = Some(displayed);
    }

    fn trigger_reveal_animation(&mut self, id: ElementId) {
        log::trace!("{id}: begin animation");
        self.write(id).reveals += 1;
    }

    fn polygon_points(&self, id: ElementId) -> Option<Vec<DVec2>> {
        self.elements.get(&id)?.points.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_residue_view_geometry() {
        let target = RecordingTarget::with_residue_view(3, 2);
        let container =
            target.polygon_points(ElementId::BarChartsContainer).unwrap();
        assert_eq!(container[0], DVec2::new(35.0, 240.0));
        assert_eq!(container[2], DVec2::new(400.0, 940.0));

        let second = target
            .polygon_points(ElementId::BoxplotBox { bar: 1 })
            .unwrap();
        // 35 + 365 * 3 / 4 = 308.75
        assert_eq!(second[0], DVec2::new(248.75, 320.0));
        assert_eq!(second[2], DVec2::new(368.75, 860.0));
        assert_eq!(target.writes(), 0);
    }

    #[test]
    fn records_last_write_per_element() {
        let mut target = RecordingTarget::new();
        let id = ElementId::Badge { index: 0 };
        target.set_fill(id, Color::RED);
        target.set_fill(id, Color::GREEN);
        target.trigger_reveal_animation(id);
        target.trigger_reveal_animation(id);

        let state = target.element(id).unwrap();
        assert_eq!(state.fill, Some(Color::GREEN));
        assert_eq!(state.reveals, 2);
        assert_eq!(target.writes(), 4);
        assert!(target.element(ElementId::ResidueSummary).is_none());
    }
}
