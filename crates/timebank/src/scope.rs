//! Scoped capture: time a block between entry and exit
//!
//! [`ScopedTimer`] is the reusable handle that remembers a label.
//! [`ActiveScope`] is the guard for one entry/exit pair; exit happens when
//! the guard is dropped, so the sample is recorded on early return, `?`
//! and panics alike.

use crate::error::{TimingError, TimingResult};
use crate::registry::TimingRegistry;
use std::time::{Duration, Instant};

/// A reusable handle for timing scopes under a configured label.
///
/// The label persists across scopes, so one handle can time the same block
/// repeatedly. While a scope is active the handle is mutably borrowed,
/// which rules out nested or overlapping scopes on the same handle.
///
/// # Example
///
/// ```rust
/// use timebank::TimingRegistry;
///
/// let registry = TimingRegistry::new();
/// let mut clock = registry.scoped();
///
/// {
///     let _scope = clock.using_label("load").enter()?;
///     // ... timed work ...
/// }
///
/// assert_eq!(registry.count("load"), 1);
/// # Ok::<(), timebank::TimingError>(())
/// ```
#[derive(Debug)]
pub struct ScopedTimer<'r> {
    registry: &'r TimingRegistry,
    label: Option<String>,
}

impl<'r> ScopedTimer<'r> {
    /// Create an unconfigured handle bound to `registry`.
    pub fn new(registry: &'r TimingRegistry) -> Self {
        Self {
            registry,
            label: None,
        }
    }

    /// Set the label for the next scopes.
    pub fn using_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    /// Get the configured label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Enter a scope. Fails with [`TimingError::MissingLabel`] if no label
    /// was ever set; nothing is recorded in that case.
    pub fn enter(&mut self) -> TimingResult<ActiveScope<'_>> {
        let label = self.label.as_deref().ok_or(TimingError::MissingLabel)?;
        Ok(ActiveScope::begin(self.registry, label))
    }

    /// Time `f` as one scope.
    pub fn run<R>(&mut self, f: impl FnOnce() -> R) -> TimingResult<R> {
        let _scope = self.enter()?;
        Ok(f())
    }
}

/// Guard for one timed scope. Records the elapsed time when dropped.
#[must_use = "the scope ends as soon as this guard is dropped"]
#[derive(Debug)]
pub struct ActiveScope<'a> {
    registry: &'a TimingRegistry,
    label: &'a str,
    start: Instant,
}

impl<'a> ActiveScope<'a> {
    pub(crate) fn begin(registry: &'a TimingRegistry, label: &'a str) -> Self {
        Self {
            registry,
            label,
            start: Instant::now(),
        }
    }

    /// Get the label this scope records under.
    #[inline]
    pub fn label(&self) -> &str {
        self.label
    }

    /// Time spent in the scope so far.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// End the scope now and return the recorded seconds.
    pub fn finish(self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        self.registry.record(self.label, secs);
        std::mem::forget(self); // Prevent double recording
        secs
    }
}

impl Drop for ActiveScope<'_> {
    fn drop(&mut self) {
        self.registry.record_duration(self.label, self.start.elapsed());
    }
}

/// Macro for easy scope timing.
///
/// Records the time until the end of the enclosing block. With one argument
/// the sample goes to [`global_registry`](crate::global_registry).
///
/// # Example
///
/// ```rust
/// use timebank::{time_scope, TimingRegistry};
///
/// let registry = TimingRegistry::new();
/// {
///     time_scope!(registry, "work");
///     // ... work ...
/// }
/// assert_eq!(registry.count("work"), 1);
/// ```
#[macro_export]
macro_rules! time_scope {
    ($registry:expr, $label:expr) => {
        let _timebank_scope = $registry.scope($label);
    };
    ($label:expr) => {
        let _timebank_scope = $crate::global_registry().scope($label);
    };
}
