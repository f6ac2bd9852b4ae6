//! Statistics Calculator Module
//! Descriptive statistics, order statistics, histograms, kernel density and correlation.

use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Relative padding added to a degenerate rescaling denominator.
pub const RESCALE_EPSILON: f64 = 1e-9;

/// Mean and range of a set of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

/// Box-plot statistics (Tukey fences at 1.5 IQR).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Smallest observation inside the lower fence.
    pub whisker_low: f64,
    /// Largest observation inside the upper fence.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// One equal-width histogram bin; `end` is exclusive except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Handles statistical calculations over plain value slices.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics. `None` for an empty slice.
    pub fn compute_descriptive_stats(values: &[f64]) -> Option<DescriptiveStats> {
        if values.is_empty() {
            return None;
        }

        let (min, max) = Self::min_max(values)?;
        let std = if values.len() > 1 {
            values.iter().std_dev()
        } else {
            0.0
        };

        Some(DescriptiveStats {
            count: values.len(),
            mean: values.iter().mean(),
            min,
            max,
            std,
        })
    }

    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        let first = *values.first()?;
        Some(
            values
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Quartiles, fences, whiskers and outliers. `None` for an empty slice.
    pub fn compute_box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= lower_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= upper_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            mean: sorted.iter().mean(),
            q1,
            median,
            q3,
            lower_fence,
            upper_fence,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Partition values into `bins` equal-width bins across their range.
    ///
    /// When every value is equal the range is widened to ±0.5 around it,
    /// as NumPy does.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let Some((mut lo, mut hi)) = Self::min_max(values) else {
            return Vec::new();
        };
        if bins == 0 {
            return Vec::new();
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == bins { hi } else { lo + (i + 1) as f64 * width },
                count,
            })
            .collect()
    }

    /// Scott's rule bandwidth, as used by SciPy's `gaussian_kde`.
    pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let std = values.iter().std_dev();
        let bandwidth = std * (values.len() as f64).powf(-0.2);
        (bandwidth.is_finite() && bandwidth > 0.0).then_some(bandwidth)
    }

    /// Gaussian kernel density evaluated at `points` evenly spaced positions
    /// between the smallest and largest value. Empty when the data has no
    /// spread.
    pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<[f64; 2]> {
        let (Some(bandwidth), Some((lo, hi))) = (Self::scott_bandwidth(values), Self::min_max(values))
        else {
            return Vec::new();
        };
        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };
        if points < 2 {
            return Vec::new();
        }

        let n = values.len() as f64;
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density = values
                    .iter()
                    .map(|&v| kernel.pdf((x - v) / bandwidth))
                    .sum::<f64>()
                    / (n * bandwidth);
                [x, density]
            })
            .collect()
    }

    /// Pearson correlation. `None` for fewer than two pairs or a constant input.
    pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }
        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        let r = xs.iter().covariance(ys.iter()) / (sx * sy);
        Some(r.clamp(-1.0, 1.0))
    }

    /// Linearly map `value` from `[min, max]` into `range`. A zero-width
    /// source range maps everything to the range start.
    pub fn rescale(value: f64, min: f64, max: f64, range: (f64, f64)) -> f64 {
        let (lo, hi) = range;
        lo + (value - min) / (max - min + RESCALE_EPSILON) * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn descriptive_stats_on_small_sample() {
        let stats = StatsCalculator::compute_descriptive_stats(&[20.0, 25.0, 36.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert!(close(stats.mean, 27.0));
        assert_eq!(stats.min, 20.0);
        assert_eq!(stats.max, 36.0);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn descriptive_stats_empty_is_none() {
        assert!(StatsCalculator::compute_descriptive_stats(&[]).is_none());
    }

    #[test]
    fn percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(close(StatsCalculator::percentile(&sorted, 25.0), 1.75));
        assert!(close(StatsCalculator::percentile(&sorted, 50.0), 2.5));
        assert!(close(StatsCalculator::percentile(&sorted, 75.0), 3.25));
    }

    #[test]
    fn box_stats_flag_outliers() {
        let values = [170.0, 172.0, 174.0, 176.0, 178.0, 230.0];
        let stats = StatsCalculator::compute_box_stats(&values).unwrap();

        assert_eq!(stats.outliers, vec![230.0]);
        assert_eq!(stats.whisker_high, 178.0);
        assert_eq!(stats.whisker_low, 170.0);
        assert!(stats.q1 <= stats.median && stats.median <= stats.q3);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values = [18.0, 19.0, 22.0, 25.0, 25.0, 30.0, 33.0, 38.0];
        let bins = StatsCalculator::histogram(&values, 15);

        assert_eq!(bins.len(), 15);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 18.0);
        assert_eq!(bins[14].end, 38.0);
        assert_eq!(bins[14].count, 1);
    }

    #[test]
    fn histogram_of_constant_values_uses_unit_range() {
        let bins = StatsCalculator::histogram(&[25.0, 25.0], 15);
        assert!(close(bins[0].start, 24.5));
        assert!(close(bins[14].end, 25.5));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn kde_integrates_to_roughly_one_inside_range() {
        let values = [20.0, 22.0, 24.0, 26.0, 28.0, 30.0];
        let curve = StatsCalculator::gaussian_kde(&values, 200);
        assert_eq!(curve.len(), 200);

        let step = curve[1][0] - curve[0][0];
        let area: f64 = curve.iter().map(|p| p[1] * step).sum();
        assert!(area > 0.6 && area < 1.0);
    }

    #[test]
    fn kde_needs_spread() {
        assert!(StatsCalculator::gaussian_kde(&[25.0, 25.0, 25.0], 50).is_empty());
        assert!(StatsCalculator::gaussian_kde(&[25.0], 50).is_empty());
    }

    #[test]
    fn pearson_detects_linear_relations() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let inverse = [8.0, 6.0, 4.0, 2.0];
        assert!(close(StatsCalculator::pearson(&xs, &ys).unwrap(), 1.0));
        assert!(close(StatsCalculator::pearson(&xs, &inverse).unwrap(), -1.0));
        assert!(StatsCalculator::pearson(&xs, &[1.0, 1.0, 1.0, 1.0]).is_none());
    }

    #[test]
    fn rescale_handles_zero_width_range() {
        assert_eq!(StatsCalculator::rescale(25.0, 25.0, 25.0, (30.0, 200.0)), 30.0);
        assert!((StatsCalculator::rescale(40.0, 20.0, 40.0, (30.0, 200.0)) - 200.0).abs() < 1e-6);
    }
}
