//! Panel layout and styling options with TOML preset support.
//!
//! Every tweakable constant of the report (ring layout, gap angle, selector
//! colors, badge and bar metric selections, label placement, startup
//! version) lives here. Options serialize to/from TOML.

mod chain_view;
mod residue_view;
mod selection;

use std::path::Path;

pub use chain_view::ChainViewOptions;
pub use residue_view::ResidueViewOptions;
use schemars::JsonSchema;
pub use selection::{InitialVersion, SelectionOptions};
use serde::{Deserialize, Serialize};

use crate::error::IrisError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[residue_view]`) work
/// correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct PanelOptions {
    /// Chain view layout.
    pub chain_view: ChainViewOptions,
    /// Residue view layout.
    pub residue_view: ResidueViewOptions,
    /// Startup selection.
    pub selection: SelectionOptions,
}

impl PanelOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(PanelOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, IrisError> {
        toml::from_str(content)
            .map_err(|e| IrisError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, IrisError> {
        let content = std::fs::read_to_string(path).map_err(IrisError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), IrisError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| IrisError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(IrisError::Io)?;
        }
        std::fs::write(path, content).map_err(IrisError::Io)
    }
}
