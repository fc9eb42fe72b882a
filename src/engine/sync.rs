//! Projection of the selection onto the render target.
//!
//! The synchronizer owns no state. It borrows everything it reads from the
//! panel and is rebuilt for every transition. The three passes cascade:
//! a version change redraws the chain layer, which redraws the residue
//! layer.

use glam::DVec2;

use crate::coords::{BoxplotCoords, CoordinateMapper};
use crate::model::metrics::{MetricLayout, MetricRef};
use crate::model::{ModelData, ModelEntry};
use crate::options::PanelOptions;
use crate::render::{BoxplotLine, ElementId, RenderTarget, Rotation};
use crate::selection::{Change, SelectionState};

/// Residue-view geometry read from the drawn report.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    /// Percentile → y mapping.
    pub mapper: CoordinateMapper,
    /// Drawn boxplot box polygon per bar; x coordinates are reused.
    pub box_templates: Vec<Vec<DVec2>>,
}

/// Borrowed view of everything a redraw needs.
pub(crate) struct ViewSynchronizer<'a> {
    pub(crate) data: &'a ModelData,
    pub(crate) options: &'a PanelOptions,
    pub(crate) layout: &'a MetricLayout,
    pub(crate) geometry: &'a BarGeometry,
    /// `[version][bar]` boxplot coordinates; `None` marks no data.
    pub(crate) boxplots: &'a [Vec<Option<BoxplotCoords>>],
    pub(crate) selection: &'a SelectionState,
}

impl ViewSynchronizer<'_> {
    /// Redraw everything a change of the given scope invalidates.
    pub(crate) fn apply(&self, change: Change, target: &mut dyn RenderTarget) {
        match change {
            Change::None => {}
            Change::Residue => self.sync_residue(target),
            Change::Chain => self.sync_chain(target),
            Change::Version => self.sync_version(target),
        }
    }

    fn sync_version(&self, target: &mut dyn RenderTarget) {
        let selected = self.selection.version;

        for (chain, entry) in self.data.chains().iter().enumerate() {
            for version in 0..entry.num_versions {
                let visible = version == selected;
                let opacity = if visible { 1.0 } else { 0.0 };
                target.set_opacity(ElementId::Shade { chain, version }, opacity);
                for (ring, metric) in self.layout.rings.iter().enumerate() {
                    match metric {
                        MetricRef::Discrete(_) => target.set_opacity(
                            ElementId::DiscreteGroup {
                                chain,
                                version,
                                ring,
                            },
                            opacity,
                        ),
                        MetricRef::Continuous(_) if visible => target
                            .trigger_reveal_animation(
                                ElementId::RingAnimation {
                                    chain,
                                    version,
                                    ring,
                                },
                            ),
                        MetricRef::Continuous(_) => {}
                    }
                }
            }
        }

        let row = self.boxplots.get(selected).map_or(&[][..], Vec::as_slice);
        for bar in 0..self.layout.bars.len() {
            self.sync_boxplot(bar, row.get(bar).copied().flatten(), target);
        }

        self.sync_chain(target);
    }

    fn sync_boxplot(
        &self,
        bar: usize,
        coords: Option<BoxplotCoords>,
        target: &mut dyn RenderTarget,
    ) {
        let box_id = ElementId::BoxplotBox { bar };
        let line_id = |line| ElementId::BoxplotLine { bar, line };

        let Some(coords) = coords else {
            target.set_opacity(box_id, 0.0);
            for line in BoxplotLine::ALL {
                target.set_opacity(line_id(line), 0.0);
            }
            return;
        };

        if let Some(template) = self.geometry.box_templates.get(bar) {
            target.set_polygon_points(box_id, &coords.box_polygon(template));
        }
        target.set_opacity(box_id, 1.0);

        let lines = [
            (BoxplotLine::Low, coords.low_y, coords.low_line_visible()),
            (BoxplotLine::Mid, coords.mean_y, true),
            (BoxplotLine::High, coords.high_y, coords.high_line_visible()),
        ];
        for (line, y, visible) in lines {
            target.set_line_endpoints(line_id(line), y, y);
            target.set_opacity(line_id(line), if visible { 1.0 } else { 0.0 });
        }
    }

    fn sync_chain(&self, target: &mut dyn RenderTarget) {
        let [unselected, selected] = self.options.chain_view.selector_colors;
        for chain in 0..self.data.num_chains() {
            let is_selected = chain == self.selection.chain;
            target.set_displayed(ElementId::ChainView { chain }, is_selected);
            target.set_fill(
                ElementId::ChainSelector { chain },
                if is_selected { selected } else { unselected },
            );
        }

        self.sync_residue(target);
    }

    fn sync_residue(&self, target: &mut dyn RenderTarget) {
        let chain = self.selection.chain;
        let Ok(entry) = self.data.chain(chain) else {
            log::warn!("selection points at missing chain {chain}");
            return;
        };
        self.sync_selector(entry, target);
        self.sync_badges(entry, target);
        self.sync_bars(entry, target);

        let SelectionState {
            version, residue, ..
        } = *self.selection;
        let seqno = entry
            .seqno(version, residue)
            .map_or_else(|| "?".to_owned(), |n| n.to_string());
        let code = entry.code(version, residue).unwrap_or("?");
        target.set_text(
            ElementId::ResidueSummary,
            &format!("Residue {seqno} ({code})"),
        );
    }

    /// Rotate the selector and highlight the selected segment.
    fn sync_selector(&self, entry: &ModelEntry, target: &mut dyn RenderTarget) {
        let SelectionState { chain, residue, .. } = *self.selection;
        let opts = &self.options.chain_view;

        let [cx, cy] = opts.rotation_center;
        target.set_transform(
            ElementId::ResidueSelector { chain },
            Rotation {
                degrees: opts.selector_angle(residue, entry.aligned_length),
                center: DVec2::new(cx, cy),
            },
        );
        for segment in 0..entry.aligned_length {
            let opacity = if segment == residue {
                opts.highlight_opacity
            } else {
                0.0
            };
            target.set_paint_opacity(
                ElementId::InteractionSegment {
                    chain,
                    residue: segment,
                },
                opacity,
            );
        }
    }

    fn sync_badges(&self, entry: &ModelEntry, target: &mut dyn RenderTarget) {
        let SelectionState {
            version, residue, ..
        } = *self.selection;
        let opts = &self.options.residue_view;

        for (index, metric) in self.layout.boxes.iter().enumerate() {
            let class = entry.discrete(metric.id, version, residue).and_then(
                |value| {
                    let class = metric.classify(value);
                    if class.is_none() {
                        log::warn!(
                            "{}: class {value} outside label table",
                            metric.long_name
                        );
                    }
                    class
                },
            );
            let (color, label) =
                class.unwrap_or((opts.na_color, opts.na_label.as_str()));
            target.set_fill(ElementId::Badge { index }, color);
            target.set_text(ElementId::BadgeText { index }, label);
        }
    }

    /// Place each bar's marker line and value label.
    fn sync_bars(&self, entry: &ModelEntry, target: &mut dyn RenderTarget) {
        let SelectionState {
            version, residue, ..
        } = *self.selection;
        let opts = &self.options.residue_view;
        let mapper = &self.geometry.mapper;

        for (bar, metric) in self.layout.bars.iter().enumerate() {
            target.set_opacity(ElementId::Boxplot { bar }, 1.0);
            let mainline = ElementId::BarMainline { bar };
            let label = ElementId::BarLabel { bar };
            if let Some(value) = entry.percentile(metric.id, version, residue) {
                let y = mapper.to_y(value);
                target.set_line_endpoints(mainline, y, y);
                target.set_opacity(mainline, 1.0);
                target.set_text(label, &value.to_string());
                target.set_y(label, opts.label_y(value, y));
            } else {
                target.set_opacity(mainline, 0.0);
                target.set_text(label, &opts.na_label);
                target.set_y(label, opts.label_y(0.0, mapper.to_y(0.0)));
            }
        }
    }
}
