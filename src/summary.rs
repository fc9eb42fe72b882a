//! Per-version distribution summaries of continuous metrics.
//!
//! A summary pools every valid, non-null percentile value of one metric in
//! one model version across all chains. The cache is filled eagerly when
//! the panel is built; source tables are immutable afterwards, so entries
//! are never invalidated. A fresh [`ModelData`] needs a fresh cache.

use serde::Serialize;

use crate::error::{IndexKind, IrisError};
use crate::model::metrics;
use crate::model::ModelData;
use crate::util::stats;

/// Upper bound of the percentile domain.
pub const PERCENTILE_MAX: f64 = 100.0;

/// Five-number boxplot summary: extremes plus a one-sigma band around the
/// mean, clamped to the percentile domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// Smallest pooled value.
    pub min: f64,
    /// Largest pooled value.
    pub max: f64,
    /// `max(0, mean - sigma)`.
    pub low: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// `min(100, mean + sigma)`.
    pub high: f64,
}

impl DistributionSummary {
    /// Summarize a non-empty pool; `None` for an empty one.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (min, max) = stats::min_max(values)?;
        let mean = stats::mean(values)?;
        let std = stats::standard_deviation(values)?;
        Some(Self {
            min,
            max,
            low: (mean - std).max(0.0),
            mean,
            high: (mean + std).min(PERCENTILE_MAX),
        })
    }

    /// Values in contract order `[min, max, low, mean, high]`.
    #[must_use]
    pub fn to_array(self) -> [f64; 5] {
        [self.min, self.max, self.low, self.mean, self.high]
    }
}

/// Summarize continuous `metric` over every chain for `version`.
pub fn summarize(
    data: &ModelData,
    metric: usize,
    version: usize,
) -> Result<DistributionSummary, IrisError> {
    if version >= data.num_versions() {
        return Err(IrisError::out_of_range(
            IndexKind::Version,
            version,
            data.num_versions(),
        ));
    }
    let _ = metrics::continuous(metric)?;

    let pool: Vec<f64> = data
        .chains()
        .iter()
        .flat_map(|chain| {
            (0..chain.aligned_length)
                .filter(move |&residue| chain.is_valid(version, residue))
                .filter_map(move |residue| {
                    chain.percentile(metric, version, residue)
                })
        })
        .collect();

    DistributionSummary::from_values(&pool)
        .ok_or(IrisError::EmptyPool { metric, version })
}

/// Write-once cache of summaries keyed by version and bar position.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCache {
    /// `[version][bar]`; `None` marks a metric with no data in a version.
    entries: Vec<Vec<Option<DistributionSummary>>>,
}

impl SummaryCache {
    /// Summarize every bar metric for every version.
    ///
    /// Empty pools are recorded as "no data" and logged rather than
    /// failing the whole panel; any other error propagates.
    pub fn build(
        data: &ModelData,
        bar_metrics: &[usize],
    ) -> Result<Self, IrisError> {
        let mut entries = Vec::with_capacity(data.num_versions());
        for version in 0..data.num_versions() {
            let mut row = Vec::with_capacity(bar_metrics.len());
            for &metric in bar_metrics {
                match summarize(data, metric, version) {
                    Ok(summary) => row.push(Some(summary)),
                    Err(e @ IrisError::EmptyPool { .. }) => {
                        log::warn!("{e}");
                        row.push(None);
                    }
                    Err(e) => return Err(e),
                }
            }
            entries.push(row);
        }
        log::debug!(
            "summarized {} bar metrics over {} versions",
            bar_metrics.len(),
            entries.len()
        );
        Ok(Self { entries })
    }

    /// Cached summary for (`version`, `bar`). `None` when the metric has
    /// no data in that version or either index is out of range.
    #[must_use]
    pub fn get(&self, version: usize, bar: usize) -> Option<DistributionSummary> {
        self.entries.get(version)?.get(bar).copied().flatten()
    }

    /// Number of cached versions.
    #[must_use]
    pub fn num_versions(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::entry;

    fn with_percentiles(
        validities: &[&[bool]],
        values: Vec<Vec<Option<f64>>>,
    ) -> crate::model::ModelEntry {
        let mut e = entry(validities);
        e.percentile_values[0] = values;
        e
    }

    #[test]
    fn pools_valid_non_null_values_across_chains() {
        let a = with_percentiles(
            &[&[true, true, false]],
            vec![vec![Some(20.0), None, Some(99.0)]],
        );
        let b = with_percentiles(&[&[true, true]], vec![vec![Some(40.0), Some(60.0)]]);
        let data = ModelData::new(vec![a, b]).unwrap();

        let s = summarize(&data, 0, 0).unwrap();
        // pool = [20, 40, 60]; 99 is at an invalid residue, None is skipped
        assert_eq!(s.min, 20.0);
        assert_eq!(s.max, 60.0);
        assert_eq!(s.mean, 40.0);
        let sigma = (800.0_f64 / 3.0).sqrt();
        assert!((s.low - (40.0 - sigma)).abs() < 1e-9);
        assert!((s.high - (40.0 + sigma)).abs() < 1e-9);
    }

    #[test]
    fn band_is_clamped_to_percentile_domain() {
        let s = DistributionSummary::from_values(&[0.0, 0.0, 100.0, 100.0])
            .unwrap();
        assert_eq!(s.low, 0.0);
        assert_eq!(s.mean, 50.0);
        assert_eq!(s.high, 100.0);
        assert!(s.min <= s.max);
        assert!(s.low <= s.mean && s.mean <= s.high);
    }

    #[test]
    fn contract_order_is_min_max_low_mean_high() {
        let s = DistributionSummary {
            min: 1.0,
            max: 2.0,
            low: 3.0,
            mean: 4.0,
            high: 5.0,
        };
        assert_eq!(s.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn empty_pool_is_reported_not_nan() {
        let a = with_percentiles(&[&[true, true]], vec![vec![None, None]]);
        let data = ModelData::new(vec![a]).unwrap();
        assert!(matches!(
            summarize(&data, 0, 0),
            Err(IrisError::EmptyPool { metric: 0, version: 0 })
        ));

        let cache = SummaryCache::build(&data, &[0]).unwrap();
        assert_eq!(cache.num_versions(), 1);
        assert_eq!(cache.get(0, 0), None);
    }

    #[test]
    fn version_out_of_range_is_rejected() {
        let a = with_percentiles(&[&[true]], vec![vec![Some(1.0)]]);
        let data = ModelData::new(vec![a]).unwrap();
        assert!(matches!(
            summarize(&data, 0, 3),
            Err(IrisError::OutOfRange { kind: IndexKind::Version, .. })
        ));
    }

    #[test]
    fn unknown_metric_is_out_of_range_not_empty() {
        let a = with_percentiles(&[&[true]], vec![vec![Some(1.0)]]);
        let data = ModelData::new(vec![a]).unwrap();
        assert!(matches!(
            summarize(&data, 99, 0),
            Err(IrisError::OutOfRange {
                kind: IndexKind::Metric,
                index: 99,
                bound: 6
            })
        ));
        assert!(matches!(
            SummaryCache::build(&data, &[0, 99]),
            Err(IrisError::OutOfRange { kind: IndexKind::Metric, .. })
        ));
    }

    #[test]
    fn cache_is_keyed_by_version_and_bar() {
        let mut a = entry(&[&[true, true], &[true, true]]);
        a.percentile_values[0] =
            vec![vec![Some(10.0), Some(30.0)], vec![Some(50.0), Some(50.0)]];
        a.percentile_values[1] =
            vec![vec![Some(80.0), Some(90.0)], vec![None, Some(5.0)]];
        let data = ModelData::new(vec![a]).unwrap();
        let cache = SummaryCache::build(&data, &[1, 0]).unwrap();

        assert_eq!(cache.get(0, 0).unwrap().mean, 85.0);
        assert_eq!(cache.get(0, 1).unwrap().mean, 20.0);
        assert_eq!(cache.get(1, 0).unwrap().min, 5.0);
        assert_eq!(cache.get(1, 1).unwrap().high, 50.0);
        assert_eq!(cache.get(2, 0), None);
    }
}
