//! Property-based tests for the aggregation laws of the registry

use proptest::prelude::*;
use timebank::TimingRegistry;

fn filled(label: &str, samples: &[f64]) -> TimingRegistry {
    let registry = TimingRegistry::new();
    for &s in samples {
        registry.record(label, s);
    }
    registry
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_aggregates_match_samples(samples in prop::collection::vec(0.0f64..10.0, 1..50)) {
        let registry = filled("L", &samples);
        let n = samples.len() as f64;
        let sum: f64 = samples.iter().sum();

        prop_assert_eq!(registry.times("L"), samples.clone());
        prop_assert!((registry.total_time("L") - sum).abs() < 1e-9);
        prop_assert!((registry.mean_time("L") - sum / n).abs() < 1e-9);
        prop_assert_eq!(registry.min_time("L"), samples.iter().copied().fold(f64::INFINITY, f64::min));
        prop_assert_eq!(registry.max_time("L"), samples.iter().copied().fold(0.0, f64::max));
    }

    #[test]
    fn prop_median_of_sorted_values(samples in prop::collection::vec(0.0f64..10.0, 1..50)) {
        let registry = filled("L", &samples);
        let mut sorted = samples.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mid = sorted.len() / 2;
        let expected = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let median = registry.median_time("L");
        prop_assert_eq!(median, expected);
        prop_assert!(registry.min_time("L") <= median && median <= registry.max_time("L"));
    }

    #[test]
    fn prop_clear_only_touches_target(
        cleared in prop::collection::vec(0.0f64..1.0, 1..10),
        kept in prop::collection::vec(0.0f64..1.0, 1..10),
    ) {
        let registry = filled("cleared", &cleared);
        for &s in &kept {
            registry.record("kept", s);
        }

        registry.clear_times(Some("cleared"));

        prop_assert!(registry.times("cleared").is_empty());
        prop_assert_eq!(registry.mean_time("cleared"), 0.0);
        prop_assert_eq!(registry.times("kept"), kept);
    }

    #[test]
    fn prop_unseen_labels_read_as_empty(label in "[a-z_]{0,12}") {
        let registry = TimingRegistry::new();

        prop_assert!(registry.times(&label).is_empty());
        prop_assert_eq!(registry.mean_time(&label), 0.0);
        prop_assert_eq!(registry.median_time(&label), 0.0);
        prop_assert_eq!(registry.min_time(&label), 0.0);
        prop_assert_eq!(registry.max_time(&label), 0.0);
        prop_assert_eq!(registry.total_time(&label), 0.0);
        prop_assert!(registry.is_empty());
    }
}
