//! Read-only per-chain validation tables, as emitted by the report
//! generator.
//!
//! The loader owns parsing; this module only checks that the tables are
//! internally consistent before anything downstream indexes into them.
//! [`ModelData::new`] is the single gate: every constructed `ModelData`
//! has matching version counts across chains, one metric table per
//! catalogue metric, per-version arrays of the chain's aligned length, and
//! at least one valid residue in every (chain, version) pair.

pub mod metrics;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::metrics::{CONTINUOUS_METRICS, DISCRETE_METRICS};
use crate::error::{IndexKind, IrisError};

/// Validation tables for one chain across all model versions.
///
/// Per-residue tables are indexed `[version][residue]`; per-metric tables
/// are indexed `[metric][version][residue]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Chain identifier as written in the structure (e.g. `"A"`).
    #[serde(default)]
    pub chain_id: String,
    /// Number of model versions.
    pub num_versions: usize,
    /// Length of the chain's sequence alignment across versions.
    pub aligned_length: usize,
    /// Whether MolProbity-derived metrics were computed.
    #[serde(default)]
    pub has_molprobity: bool,
    /// Whether covariance-derived metrics were computed.
    #[serde(default)]
    pub has_covariance: bool,
    /// Whether reflection-derived metrics were computed.
    #[serde(default)]
    pub has_reflections: bool,
    /// `true` where the residue exists in that version's alignment.
    pub residue_validities: Vec<Vec<bool>>,
    /// Author sequence numbers; `None` at alignment gaps.
    pub residue_seqnos: Vec<Vec<Option<i32>>>,
    /// Residue codes; `None` at alignment gaps.
    pub residue_codes: Vec<Vec<Option<String>>>,
    /// Percentile ranks in [0, 100]; `None` where not applicable.
    pub percentile_values: Vec<Vec<Vec<Option<f64>>>>,
    /// Indices into a discrete metric's label/color table.
    pub discrete_values: Vec<Vec<Vec<Option<usize>>>>,
}

impl ModelEntry {
    /// Whether `residue` exists in `version`. Out-of-range indices are
    /// never valid.
    #[must_use]
    pub fn is_valid(&self, version: usize, residue: usize) -> bool {
        self.residue_validities
            .get(version)
            .and_then(|row| row.get(residue))
            .copied()
            .unwrap_or(false)
    }

    /// Percentile value of continuous `metric` at (`version`, `residue`).
    #[must_use]
    pub fn percentile(
        &self,
        metric: usize,
        version: usize,
        residue: usize,
    ) -> Option<f64> {
        self.percentile_values
            .get(metric)?
            .get(version)?
            .get(residue)
            .copied()
            .flatten()
    }

    /// Discrete table index of `metric` at (`version`, `residue`).
    #[must_use]
    pub fn discrete(
        &self,
        metric: usize,
        version: usize,
        residue: usize,
    ) -> Option<usize> {
        self.discrete_values
            .get(metric)?
            .get(version)?
            .get(residue)
            .copied()
            .flatten()
    }

    /// Sequence number at (`version`, `residue`).
    #[must_use]
    pub fn seqno(&self, version: usize, residue: usize) -> Option<i32> {
        self.residue_seqnos
            .get(version)?
            .get(residue)
            .copied()
            .flatten()
    }

    /// Residue code at (`version`, `residue`).
    #[must_use]
    pub fn code(&self, version: usize, residue: usize) -> Option<&str> {
        self.residue_codes.get(version)?.get(residue)?.as_deref()
    }

    fn validate(&self, chain: usize) -> Result<(), IrisError> {
        let ctx = |what: &str| {
            IrisError::ModelData(format!(
                "chain {chain} ({}): {what}",
                self.chain_id
            ))
        };

        if self.aligned_length == 0 {
            return Err(ctx("aligned length is zero"));
        }
        check_rows(&self.residue_validities, self, "residue_validities")
            .map_err(|e| ctx(e.as_str()))?;
        check_rows(&self.residue_seqnos, self, "residue_seqnos")
            .map_err(|e| ctx(e.as_str()))?;
        check_rows(&self.residue_codes, self, "residue_codes")
            .map_err(|e| ctx(e.as_str()))?;
        check_tables(
            self.percentile_values.len(),
            CONTINUOUS_METRICS.len(),
            "percentile_values",
        )
        .map_err(|e| ctx(e.as_str()))?;
        check_tables(
            self.discrete_values.len(),
            DISCRETE_METRICS.len(),
            "discrete_values",
        )
        .map_err(|e| ctx(e.as_str()))?;
        for (metric, table) in self.percentile_values.iter().enumerate() {
            check_rows(table, self, &format!("percentile_values[{metric}]"))
                .map_err(|e| ctx(e.as_str()))?;
        }
        for (metric, table) in self.discrete_values.iter().enumerate() {
            check_rows(table, self, &format!("discrete_values[{metric}]"))
                .map_err(|e| ctx(e.as_str()))?;
        }

        for (version, row) in self.residue_validities.iter().enumerate() {
            if !row.iter().any(|&valid| valid) {
                return Err(IrisError::NoValidResidue { chain, version });
            }
        }
        Ok(())
    }
}

/// Check a per-metric table list has one table per catalogue metric.
fn check_tables(found: usize, expected: usize, name: &str) -> Result<(), String> {
    if found == expected {
        Ok(())
    } else {
        Err(format!("{name} has {found} metric tables, expected {expected}"))
    }
}

/// Check a `[version][residue]` table has `num_versions` rows of
/// `aligned_length` entries each.
fn check_rows<T>(
    rows: &[Vec<T>],
    entry: &ModelEntry,
    name: &str,
) -> Result<(), String> {
    if rows.len() != entry.num_versions {
        return Err(format!(
            "{name} has {} versions, expected {}",
            rows.len(),
            entry.num_versions
        ));
    }
    for (version, row) in rows.iter().enumerate() {
        if row.len() != entry.aligned_length {
            return Err(format!(
                "{name}[{version}] has {} residues, expected {}",
                row.len(),
                entry.aligned_length
            ));
        }
    }
    Ok(())
}

/// Validated tables for every chain of the structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelData {
    chains: Vec<ModelEntry>,
}

impl ModelData {
    /// Validate and wrap per-chain tables.
    pub fn new(chains: Vec<ModelEntry>) -> Result<Self, IrisError> {
        let Some(first) = chains.first() else {
            return Err(IrisError::ModelData("model has no chains".into()));
        };
        if first.num_versions == 0 {
            return Err(IrisError::ModelData("model has no versions".into()));
        }
        let num_versions = first.num_versions;
        for (chain, entry) in chains.iter().enumerate() {
            if entry.num_versions != num_versions {
                return Err(IrisError::ModelData(format!(
                    "chain {chain} has {} versions, chain 0 has {num_versions}",
                    entry.num_versions
                )));
            }
            entry.validate(chain)?;
        }
        log::debug!(
            "model data: {} chains, {num_versions} versions",
            chains.len()
        );
        Ok(Self { chains })
    }

    /// Parse and validate the report generator's JSON array of chains.
    pub fn from_json(json: &str) -> Result<Self, IrisError> {
        let chains: Vec<ModelEntry> = serde_json::from_str(json)?;
        Self::new(chains)
    }

    /// Read, parse and validate a JSON model file.
    pub fn load(path: &Path) -> Result<Self, IrisError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// All chains in report order.
    #[must_use]
    pub fn chains(&self) -> &[ModelEntry] {
        &self.chains
    }

    /// Number of chains.
    #[must_use]
    pub fn num_chains(&self) -> usize {
        self.chains.len()
    }

    /// Number of model versions, shared by every chain.
    #[must_use]
    pub fn num_versions(&self) -> usize {
        self.chains.first().map_or(0, |c| c.num_versions)
    }

    /// Chain `index`, or an out-of-range error.
    pub fn chain(&self, index: usize) -> Result<&ModelEntry, IrisError> {
        self.chains.get(index).ok_or_else(|| {
            IrisError::out_of_range(IndexKind::Chain, index, self.chains.len())
        })
    }

    /// Which optional data sources are present, as reported by the first
    /// chain.
    #[must_use]
    pub fn availability(&self) -> metrics::Availability {
        self.chains.first().map_or_else(Default::default, |c| {
            metrics::Availability {
                molprobity: c.has_molprobity,
                covariance: c.has_covariance,
                reflections: c.has_reflections,
            }
        })
    }
}

impl<'de> Deserialize<'de> for ModelData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let chains = Vec::<ModelEntry>::deserialize(deserializer)?;
        Self::new(chains).map_err(serde::de::Error::custom)
    }
}
