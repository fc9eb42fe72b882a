//! Descriptive statistics over plain `f64` slices.
//!
//! Every function returns `None` for an empty input instead of producing
//! NaN. Callers that need an error (e.g. the distribution summarizer) map
//! `None` onto their own "no data" condition.

/// Arithmetic mean.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N, not N - 1).
#[must_use]
pub fn standard_deviation(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Linearly interpolated percentile, `p` in [0, 1].
///
/// Sorts a copy of `values` in numeric order; the input is left untouched.
/// `p` outside [0, 1] is clamped.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    let lower = sorted[base];
    Some(
        sorted
            .get(base + 1)
            .map_or(lower, |upper| lower + rest * (upper - lower)),
    )
}

/// Minimum and maximum in one pass.
#[must_use]
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &v| (lo.min(v), hi.max(v)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_between_ranks() {
        assert_eq!(percentile(&[10.0, 20.0, 30.0, 40.0], 0.5), Some(25.0));
        assert_eq!(percentile(&[40.0, 10.0, 30.0, 20.0], 0.0), Some(10.0));
        assert_eq!(percentile(&[40.0, 10.0, 30.0, 20.0], 1.0), Some(40.0));
    }

    #[test]
    fn percentile_of_single_value_is_that_value() {
        for p in [0.0, 0.25, 0.5, 0.9, 1.0] {
            assert_eq!(percentile(&[5.0], p), Some(5.0));
        }
    }

    #[test]
    fn percentile_sorts_multi_digit_values_numerically() {
        // Lexicographic order would put 100 before 9 and return 100.
        assert_eq!(percentile(&[9.0, 100.0, 10.0], 0.5), Some(10.0));
        assert_eq!(percentile(&[85.0, 9.5, 100.0, 12.0], 0.0), Some(9.5));
    }

    #[test]
    fn percentile_leaves_input_order_alone() {
        let values = vec![3.0, 1.0, 2.0];
        let _ = percentile(&values, 0.5);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn standard_deviation_of_constant_is_zero() {
        assert_eq!(standard_deviation(&[42.0; 7]), Some(0.0));
    }

    #[test]
    fn standard_deviation_is_population() {
        // mean 5, squared diffs sum 32 over N = 8 -> variance 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(standard_deviation(&values), Some(2.0));
    }

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(standard_deviation(&[]), None);
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn min_max_finds_extremes() {
        assert_eq!(min_max(&[50.0, 3.5, 99.0, 12.0]), Some((3.5, 99.0)));
    }
}
