//! Aggregation over recorded samples

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Statistical summary of one label's samples, in seconds.
///
/// An empty sample set yields all zeros, matching the per-label queries on
/// [`TimingRegistry`](crate::TimingRegistry).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingStats {
    /// Number of samples
    pub count: usize,
    /// Shortest sample
    pub min_secs: f64,
    /// Longest sample
    pub max_secs: f64,
    /// Arithmetic mean
    pub mean_secs: f64,
    /// Median of the value-sorted samples
    pub median_secs: f64,
    /// Sum of all samples
    pub total_secs: f64,
}

impl TimingStats {
    /// Calculate statistics from a slice of samples.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let count = samples.len();
        let sorted = sorted_copy(samples);
        let total_secs = total(samples);

        Self {
            count,
            min_secs: sorted[0],
            max_secs: sorted[count - 1],
            mean_secs: total_secs / count as f64,
            median_secs: median_of_sorted(&sorted),
            total_secs,
        }
    }
}

/// Aggregates for every live label, ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSummary {
    /// Statistics keyed by label
    pub labels: BTreeMap<String, TimingStats>,
    /// Sample count across all labels
    pub total_samples: usize,
}

pub(crate) fn total(samples: &[f64]) -> f64 {
    samples.iter().sum()
}

pub(crate) fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    total(samples) / samples.len() as f64
}

pub(crate) fn min(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub(crate) fn max(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Median by value. The input order is left untouched.
pub(crate) fn median(samples: &[f64]) -> f64 {
    median_of_sorted(&sorted_copy(samples))
}

fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let count = sorted.len();
    if count == 0 {
        0.0
    } else if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_unsorted_even_count() {
        // Recording order, not value order
        let samples = [0.4, 0.1, 0.3, 0.2];
        let stats = TimingStats::from_samples(&samples);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.min_secs, 0.1);
        assert_eq!(stats.max_secs, 0.4);
        assert_eq!(stats.median_secs, (0.2 + 0.3) / 2.0);
        assert!((stats.total_secs - 1.0).abs() < 1e-12);
        assert!((stats.mean_secs - 0.25).abs() < 1e-12);
        assert_eq!(stats.total_secs, total(&samples));
    }

    #[test]
    fn test_timing_stats_empty() {
        let stats = TimingStats::from_samples(&[]);
        assert_eq!(stats, TimingStats::default());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.median_secs, 0.0);
    }

    #[test]
    fn test_median_does_not_reorder_input() {
        let samples = vec![0.3, 0.1, 0.2];
        assert_eq!(median(&samples), 0.2);
        assert_eq!(samples, vec![0.3, 0.1, 0.2]);
    }

    #[test]
    fn test_median_even_count_averages_middle_pair() {
        assert_eq!(median(&[0.2, 0.1, 0.4, 0.3]), (0.2 + 0.3) / 2.0);
    }

    #[test]
    fn test_empty_reductions_are_zero() {
        assert_eq!(total(&[]), 0.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(min(&[]), 0.0);
        assert_eq!(max(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = TimingStats::from_samples(&[0.123]);
        assert_eq!(stats.min_secs, 0.123);
        assert_eq!(stats.max_secs, 0.123);
        assert_eq!(stats.median_secs, 0.123);
        assert_eq!(stats.total_secs, 0.123);
        assert_eq!(stats.mean_secs, 0.123);
    }
}
