//! Label-keyed storage and aggregation of timing samples

use crate::error::{TimingError, TimingResult};
use crate::scope::{ActiveScope, ScopedTimer};
use crate::stats::{self, TimingStats, TimingSummary};
use crate::timer::Timer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

/// Process-wide registry instance
static GLOBAL_REGISTRY: OnceLock<TimingRegistry> = OnceLock::new();

/// Get the process-wide registry.
///
/// Lazily created on first use with the default configuration. Code that
/// wants isolated data (tests, for instance) should own a
/// [`TimingRegistry`] instead.
pub fn global_registry() -> &'static TimingRegistry {
    GLOBAL_REGISTRY.get_or_init(TimingRegistry::new)
}

/// Wall-clock samples grouped by label.
///
/// Every sample is a duration in seconds. A label that was never recorded
/// and a label whose samples were cleared are indistinguishable: queries
/// return an empty sequence or `0.0`, and never create the label.
///
/// The label map sits behind a mutex, so a registry can be shared between
/// threads. The lock is held only while a sample is appended or read, never
/// while timed code runs. Samples recorded concurrently under one label are
/// stored in whatever order the lock was acquired.
#[derive(Debug)]
pub struct TimingRegistry {
    samples: Mutex<HashMap<String, Vec<f64>>>,
    /// Per-label retention limit; oldest samples are dropped first
    max_samples: Option<usize>,
    enabled: AtomicBool,
}

impl TimingRegistry {
    /// Create an empty registry that keeps every sample.
    pub fn new() -> Self {
        Self {
            samples: Mutex::new(HashMap::new()),
            max_samples: None,
            enabled: AtomicBool::new(true),
        }
    }

    /// Keep at most `max` samples per label (at least one is always kept).
    pub fn with_max_samples(mut self, max: usize) -> Self {
        self.max_samples = Some(max.max(1));
        self
    }

    /// Enable or disable recording. Queries and clears work either way.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Check if recording is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Append a sample in seconds under `label`.
    ///
    /// Negative and non-finite values are dropped with a warning; use
    /// [`try_record`](Self::try_record) to observe the rejection.
    pub fn record(&self, label: &str, secs: f64) {
        if let Err(err) = self.try_record(label, secs) {
            tracing::warn!(
                target: "timebank::record",
                label = label,
                value = secs,
                "sample rejected: {err}"
            );
        }
    }

    /// Append a sample in seconds, failing on negative or non-finite values.
    ///
    /// Validation happens first. A valid sample offered to a disabled
    /// registry is discarded and still returns `Ok(())`, so `Ok` means
    /// "accepted", not "stored".
    pub fn try_record(&self, label: &str, secs: f64) -> TimingResult<()> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(TimingError::InvalidDuration {
                label: label.to_string(),
                value: secs,
            });
        }
        if !self.is_enabled() {
            return Ok(());
        }

        {
            let mut bank = self.bank();
            let times = bank.entry(label.to_string()).or_default();
            if let Some(max) = self.max_samples {
                if times.len() >= max {
                    times.remove(0);
                }
            }
            times.push(secs);
        }

        // Logged after unlocking: a subscriber may read this registry
        tracing::trace!(
            target: "timebank::record",
            label = label,
            secs = secs,
            "sample recorded"
        );
        Ok(())
    }

    /// Append a measured [`Duration`] under `label`.
    pub fn record_duration(&self, label: &str, elapsed: Duration) {
        self.record(label, elapsed.as_secs_f64());
    }

    /// Copy of the samples for `label`, in recording order.
    pub fn times(&self, label: &str) -> Vec<f64> {
        self.with_samples(label, <[f64]>::to_vec)
    }

    /// Number of samples stored for `label`.
    pub fn count(&self, label: &str) -> usize {
        self.with_samples(label, <[f64]>::len)
    }

    /// Arithmetic mean, or `0.0` without samples.
    pub fn mean_time(&self, label: &str) -> f64 {
        self.with_samples(label, stats::mean)
    }

    /// Median by value, or `0.0` without samples.
    pub fn median_time(&self, label: &str) -> f64 {
        self.with_samples(label, stats::median)
    }

    /// Shortest sample, or `0.0` without samples.
    pub fn min_time(&self, label: &str) -> f64 {
        self.with_samples(label, stats::min)
    }

    /// Longest sample, or `0.0` without samples.
    pub fn max_time(&self, label: &str) -> f64 {
        self.with_samples(label, stats::max)
    }

    /// Sum of all samples, or `0.0` without samples.
    pub fn total_time(&self, label: &str) -> f64 {
        self.with_samples(label, stats::total)
    }

    /// All aggregates for `label` at once.
    pub fn stats(&self, label: &str) -> TimingStats {
        self.with_samples(label, TimingStats::from_samples)
    }

    /// Remove one label's samples, or every label's when `label` is `None`.
    ///
    /// Clearing a label that holds no samples is a no-op.
    pub fn clear_times(&self, label: Option<&str>) {
        match label {
            Some(label) => {
                let removed = self.bank().remove(label).map_or(0, |times| times.len());
                tracing::debug!(
                    target: "timebank::clear",
                    label = label,
                    removed = removed,
                    "label cleared"
                );
            }
            None => {
                let labels = {
                    let mut bank = self.bank();
                    let labels = bank.len();
                    bank.clear();
                    labels
                };
                tracing::debug!(target: "timebank::clear", labels = labels, "all labels cleared");
            }
        }
    }

    /// Labels currently holding samples, sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.bank().keys().cloned().collect();
        labels.sort();
        labels
    }

    /// Number of labels currently holding samples.
    pub fn len(&self) -> usize {
        self.bank().len()
    }

    /// Check if no label holds samples.
    pub fn is_empty(&self) -> bool {
        self.bank().is_empty()
    }

    /// Aggregates for every live label.
    pub fn summary(&self) -> TimingSummary {
        let bank = self.bank();
        TimingSummary {
            labels: bank
                .iter()
                .map(|(label, times)| (label.clone(), TimingStats::from_samples(times)))
                .collect(),
            total_samples: bank.values().map(Vec::len).sum(),
        }
    }

    /// Emit one `info` event per live label with its aggregates.
    pub fn log_summary(&self) {
        for (label, stats) in self.summary().labels {
            tracing::info!(
                target: "timebank::summary",
                label = %label,
                count = stats.count,
                min_secs = stats.min_secs,
                max_secs = stats.max_secs,
                mean_secs = stats.mean_secs,
                median_secs = stats.median_secs,
                total_secs = stats.total_secs,
                "timing summary"
            );
        }
    }

    /// Wrapper capture: a [`Timer`] that records each wrapped call under `label`.
    pub fn make_timer(&self, label: impl Into<String>) -> Timer<'_> {
        Timer::new(self, label)
    }

    /// A reusable scoped-capture handle bound to this registry.
    pub fn scoped(&self) -> ScopedTimer<'_> {
        ScopedTimer::new(self)
    }

    /// Start timing a scope under `label` right away.
    ///
    /// The sample is recorded when the returned guard is dropped.
    pub fn scope<'a>(&'a self, label: &'a str) -> ActiveScope<'a> {
        ActiveScope::begin(self, label)
    }

    fn with_samples<R>(&self, label: &str, f: impl FnOnce(&[f64]) -> R) -> R {
        let bank = self.bank();
        f(bank.get(label).map_or(&[][..], Vec::as_slice))
    }

    /// Lock the label map. A panic elsewhere cannot leave a `Vec<f64>`
    /// half-written, so a poisoned lock is still safe to use.
    fn bank(&self) -> MutexGuard<'_, HashMap<String, Vec<f64>>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TimingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
