//! Crate-level error types.

use std::fmt;

/// Index axis named in [`IrisError::OutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Chain index into the model data.
    Chain,
    /// Model-version index.
    Version,
    /// Residue position in a chain's aligned sequence.
    Residue,
    /// Metric id into a per-metric table.
    Metric,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chain => "chain",
            Self::Version => "version",
            Self::Residue => "residue",
            Self::Metric => "metric",
        };
        f.write_str(name)
    }
}

/// Errors produced by the iris-panel crate.
#[derive(Debug)]
pub enum IrisError {
    /// A distribution summary was requested over zero valid values.
    EmptyPool {
        /// Continuous metric id.
        metric: usize,
        /// Model-version index.
        version: usize,
    },
    /// A chain has no valid residue to land on for a version.
    NoValidResidue {
        /// Chain index.
        chain: usize,
        /// Model-version index.
        version: usize,
    },
    /// A chain/version/residue/metric index outside its declared bounds.
    OutOfRange {
        /// Which axis was out of range.
        kind: IndexKind,
        /// The rejected index.
        index: usize,
        /// Exclusive upper bound for the axis.
        bound: usize,
    },
    /// Model data is structurally inconsistent or failed to parse.
    ModelData(String),
    /// The render target could not supply geometry needed for calibration.
    MissingGeometry(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A textual panel command could not be parsed.
    InvalidCommand(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl IrisError {
    /// Build an [`IrisError::OutOfRange`] for `index` against `bound`.
    #[must_use]
    pub fn out_of_range(kind: IndexKind, index: usize, bound: usize) -> Self {
        Self::OutOfRange { kind, index, bound }
    }
}

impl fmt::Display for IrisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPool { metric, version } => write!(
                f,
                "no data for metric {metric} in version {version}"
            ),
            Self::NoValidResidue { chain, version } => write!(
                f,
                "chain {chain} has no valid residue in version {version}"
            ),
            Self::OutOfRange { kind, index, bound } => {
                write!(f, "{kind} index {index} out of range (0..{bound})")
            }
            Self::ModelData(msg) => write!(f, "model data error: {msg}"),
            Self::MissingGeometry(msg) => {
                write!(f, "missing render geometry: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidCommand(msg) => {
                write!(f, "invalid command: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for IrisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IrisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for IrisError {
    fn from(e: serde_json::Error) -> Self {
        Self::ModelData(e.to_string())
    }
}
