use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which model version is selected when the panel opens.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum InitialVersion {
    /// The most recent version, as drawn by the report generator.
    #[default]
    Latest,
    /// The earliest version.
    First,
}

impl InitialVersion {
    /// Resolve to an index given the number of versions (at least one).
    #[must_use]
    pub fn index(self, num_versions: usize) -> usize {
        match self {
            Self::Latest => num_versions.saturating_sub(1),
            Self::First => 0,
        }
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Selection", inline)]
#[serde(default)]
/// Startup selection.
pub struct SelectionOptions {
    /// Version selected on open.
    #[schemars(title = "Initial Version")]
    pub initial_version: InitialVersion,
}
