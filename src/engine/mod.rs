//! The interactive panel: model data, derived summaries and the live
//! selection, driven by [`PanelCommand`]s.

pub mod command;
mod sync;
#[cfg(feature = "web")]
pub mod web;

pub use self::command::PanelCommand;
pub use self::sync::BarGeometry;
use self::sync::ViewSynchronizer;
use crate::coords::{BoxplotCoords, CoordinateMapper};
use crate::error::IrisError;
use crate::model::metrics::MetricLayout;
use crate::model::ModelData;
use crate::options::PanelOptions;
use crate::render::{ElementId, RenderTarget};
use crate::selection::{Change, SelectionState};
use crate::summary::{DistributionSummary, SummaryCache};

/// Minimum points in a boxplot box template.
const BOX_TEMPLATE_POINTS: usize = 4;

/// Owns everything the panel knows and applies commands against a
/// [`RenderTarget`].
///
/// All fallible work (metric resolution, summaries, geometry calibration)
/// happens in [`Panel::new`] or in the transition itself; once a transition
/// has been committed the redraw cannot fail.
#[derive(Debug, Clone)]
pub struct Panel {
    data: ModelData,
    options: PanelOptions,
    layout: MetricLayout,
    summaries: SummaryCache,
    geometry: BarGeometry,
    /// `[version][bar]`, mapped once per calibration.
    boxplots: Vec<Vec<Option<BoxplotCoords>>>,
    selection: SelectionState,
}

impl Panel {
    /// Build a panel over `data`, reading the residue-view geometry from
    /// `target`.
    pub fn new(
        data: ModelData,
        options: PanelOptions,
        target: &dyn RenderTarget,
    ) -> Result<Self, IrisError> {
        let layout = MetricLayout::resolve(
            &options.chain_view.rings,
            &options.residue_view.boxes,
            &options.residue_view.bars,
            data.availability(),
        )?;

        let bar_ids: Vec<usize> = layout.bars.iter().map(|m| m.id).collect();
        let summaries = SummaryCache::build(&data, &bar_ids)?;
        let geometry = read_geometry(target, layout.bars.len())?;
        let boxplots = map_boxplots(&summaries, &geometry.mapper, bar_ids.len());

        let version = options
            .selection
            .initial_version
            .index(data.num_versions());
        let selection = SelectionState::with_selection(&data, version, 0, 0)?;

        log::info!(
            "panel ready: {} chains, {} versions, {} rings, {} badges, {} bars",
            data.num_chains(),
            data.num_versions(),
            layout.rings.len(),
            layout.boxes.len(),
            layout.bars.len(),
        );

        Ok(Self {
            data,
            options,
            layout,
            summaries,
            geometry,
            boxplots,
            selection,
        })
    }

    /// Draw the full initial state.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        self.synchronizer().apply(Change::Version, target);
    }

    /// Run one transition and redraw what it invalidated.
    ///
    /// On error nothing is committed and nothing is drawn.
    pub fn execute(
        &mut self,
        command: PanelCommand,
        target: &mut dyn RenderTarget,
    ) -> Result<Change, IrisError> {
        let change = match command {
            PanelCommand::ToggleVersion => {
                let change = self.selection.advance_version(&self.data)?;
                let version = self.selection.version;
                target.trigger_reveal_animation(
                    ElementId::SwitchMoveAnimation { version },
                );
                target.trigger_reveal_animation(
                    ElementId::SwitchColorAnimation { version },
                );
                change
            }
            PanelCommand::SelectChain { chain } => {
                self.selection.select_chain(&self.data, chain)?
            }
            PanelCommand::Residue { action, residue } => self
                .selection
                .residue_interaction(&self.data, action, residue)?,
            PanelCommand::Recalibrate => {
                let geometry = read_geometry(target, self.layout.bars.len())?;
                self.boxplots = map_boxplots(
                    &self.summaries,
                    &geometry.mapper,
                    self.layout.bars.len(),
                );
                self.geometry = geometry;
                Change::Version
            }
        };

        log::debug!("{command:?} -> {change:?}");
        self.synchronizer().apply(change, target);
        Ok(change)
    }

    fn synchronizer(&self) -> ViewSynchronizer<'_> {
        ViewSynchronizer {
            data: &self.data,
            options: &self.options,
            layout: &self.layout,
            geometry: &self.geometry,
            boxplots: &self.boxplots,
            selection: &self.selection,
        }
    }

    // -- Accessors --

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Validated model data.
    #[must_use]
    pub fn data(&self) -> &ModelData {
        &self.data
    }

    /// Options the panel was built with.
    #[must_use]
    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Metrics drawn after availability filtering.
    #[must_use]
    pub fn layout(&self) -> &MetricLayout {
        &self.layout
    }

    /// Calibrated residue-view geometry.
    #[must_use]
    pub fn geometry(&self) -> &BarGeometry {
        &self.geometry
    }

    /// Cached summary for bar position `bar` in `version`.
    #[must_use]
    pub fn summary(
        &self,
        version: usize,
        bar: usize,
    ) -> Option<DistributionSummary> {
        self.summaries.get(version, bar)
    }

    /// Mapped boxplot for bar position `bar` in `version`.
    #[must_use]
    pub fn boxplot(&self, version: usize, bar: usize) -> Option<BoxplotCoords> {
        self.boxplots.get(version)?.get(bar).copied().flatten()
    }
}

/// Calibrate from the bar-chart container and collect box templates.
fn read_geometry(
    target: &dyn RenderTarget,
    num_bars: usize,
) -> Result<BarGeometry, IrisError> {
    let container = target
        .polygon_points(ElementId::BarChartsContainer)
        .ok_or_else(|| {
            IrisError::MissingGeometry(
                ElementId::BarChartsContainer.to_string(),
            )
        })?;
    let mapper = CoordinateMapper::calibrate(&container)?;

    let box_templates = (0..num_bars)
        .map(|bar| {
            let id = ElementId::BoxplotBox { bar };
            match target.polygon_points(id) {
                Some(points) if points.len() >= BOX_TEMPLATE_POINTS => {
                    Ok(points)
                }
                Some(points) => Err(IrisError::MissingGeometry(format!(
                    "{id} has {} points, need {BOX_TEMPLATE_POINTS}",
                    points.len()
                ))),
                None => Err(IrisError::MissingGeometry(id.to_string())),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "calibrated: offset {}, multiplier {}",
        mapper.offset(),
        mapper.multiplier()
    );
    Ok(BarGeometry {
        mapper,
        box_templates,
    })
}

fn map_boxplots(
    summaries: &SummaryCache,
    mapper: &CoordinateMapper,
    num_bars: usize,
) -> Vec<Vec<Option<BoxplotCoords>>> {
    (0..summaries.num_versions())
        .map(|version| {
            (0..num_bars)
                .map(|bar| {
                    summaries
                        .get(version, bar)
                        .map(|summary| mapper.boxplot(&summary))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::entry;
    use crate::render::recording::RecordingTarget;
    use crate::render::BoxplotLine;
    use crate::selection::ResidueAction;
    use crate::util::color::Color;

    /// Two chains, two versions, with percentiles for the two default bars.
    fn data() -> ModelData {
        let mut a = entry(&[&[true, true, false], &[false, true, true]]);
        a.percentile_values = vec![
            vec![
                vec![Some(5.0), Some(50.0), None],
                vec![None, Some(20.0), Some(80.0)],
            ];
            6
        ];
        a.discrete_values = vec![
            vec![
                vec![Some(0), Some(2), None],
                vec![None, Some(1), Some(7)],
            ];
            3
        ];
        let mut b = entry(&[&[true, true], &[true, true]]);
        b.percentile_values =
            vec![vec![vec![Some(90.0), Some(10.0)]; 2]; 6];
        ModelData::new(vec![a, b]).unwrap()
    }

    fn panel() -> (Panel, RecordingTarget) {
        let options = PanelOptions::default();
        let target = RecordingTarget::with_residue_view(
            options.residue_view.boxes.len(),
            options.residue_view.bars.len(),
        );
        let panel = Panel::new(data(), options, &target).unwrap();
        (panel, target)
    }

    #[test]
    fn starts_on_latest_version_first_valid_residue() {
        let (panel, _) = panel();
        assert_eq!(panel.selection().version, 1);
        assert_eq!(panel.selection().chain, 0);
        assert_eq!(panel.selection().residue, 1);
    }

    #[test]
    fn missing_container_is_rejected() {
        let target = RecordingTarget::new();
        let err =
            Panel::new(data(), PanelOptions::default(), &target).unwrap_err();
        assert!(matches!(err, IrisError::MissingGeometry(_)));
    }

    #[test]
    fn render_draws_visible_version_only() {
        let (panel, mut target) = panel();
        panel.render(&mut target);
        let shade = |version| {
            target
                .element(ElementId::Shade { chain: 0, version })
                .and_then(|e| e.opacity)
        };
        assert_eq!(shade(0), Some(0.0));
        assert_eq!(shade(1), Some(1.0));
        assert_eq!(
            target
                .element(ElementId::ChainView { chain: 1 })
                .and_then(|e| e.displayed),
            Some(false)
        );
    }

    #[test]
    fn toggle_triggers_switch_animations() {
        let (mut panel, mut target) = panel();
        let change = panel
            .execute(PanelCommand::ToggleVersion, &mut target)
            .unwrap();
        assert_eq!(change, Change::Version);
        assert_eq!(panel.selection().version, 0);
        let reveals = |id| target.element(id).map_or(0, |e| e.reveals);
        assert_eq!(reveals(ElementId::SwitchMoveAnimation { version: 0 }), 1);
        assert_eq!(reveals(ElementId::SwitchColorAnimation { version: 0 }), 1);
    }

    #[test]
    fn unknown_discrete_class_falls_back_to_na() {
        let (mut panel, mut target) = panel();
        let _ = panel
            .execute(
                PanelCommand::Residue {
                    action: ResidueAction::Begin,
                    residue: 2,
                },
                &mut target,
            )
            .unwrap();
        let badge = target.element(ElementId::Badge { index: 0 }).unwrap();
        assert_eq!(badge.fill, Some(Color::VERY_LIGHT_GREY));
        let text = target.element(ElementId::BadgeText { index: 0 }).unwrap();
        assert_eq!(text.text.as_deref(), Some("N/A"));
    }

    #[test]
    fn failed_command_draws_nothing() {
        let (mut panel, mut target) = panel();
        panel.render(&mut target);
        let before = target.writes();
        let selection = *panel.selection();
        let err = panel
            .execute(PanelCommand::SelectChain { chain: 9 }, &mut target)
            .unwrap_err();
        assert!(matches!(err, IrisError::OutOfRange { .. }));
        assert_eq!(target.writes(), before);
        assert_eq!(*panel.selection(), selection);
    }

    #[test]
    fn recalibrate_remaps_boxplots() {
        let (mut panel, _) = panel();
        let before = panel.boxplot(1, 0).unwrap();

        let mut target = RecordingTarget::with_residue_view(0, 2);
        let _ = panel.execute(PanelCommand::Recalibrate, &mut target).unwrap();
        let after = panel.boxplot(1, 0).unwrap();
        assert_ne!(before, after);
        assert_eq!(panel.geometry().mapper.offset(), 940.0);
        assert_eq!(panel.geometry().mapper.multiplier(), -9.1);

        let line = target
            .element(ElementId::BoxplotLine {
                bar: 0,
                line: BoxplotLine::Mid,
            })
            .and_then(|e| e.line_y)
            .unwrap();
        assert_eq!(line.0, after.mean_y);
    }
}
