//! Wrapper capture: time every call of a function

use crate::registry::TimingRegistry;
use crate::scope::ActiveScope;

/// Records the duration of wrapped calls under a fixed label.
///
/// A sample is recorded for every call, whether the call returns normally
/// (including returning an `Err`) or unwinds from a panic. Return values and
/// panics pass through untouched.
///
/// # Example
///
/// ```rust
/// use timebank::TimingRegistry;
///
/// let registry = TimingRegistry::new();
/// let mut square = registry.make_timer("square").wrap(|x: u64| x * x);
///
/// assert_eq!(square(7), 49);
/// assert_eq!(square(8), 64);
/// assert_eq!(registry.count("square"), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Timer<'r> {
    registry: &'r TimingRegistry,
    label: String,
}

impl<'r> Timer<'r> {
    /// Create a timer recording into `registry` under `label`.
    pub fn new(registry: &'r TimingRegistry, label: impl Into<String>) -> Self {
        Self {
            registry,
            label: label.into(),
        }
    }

    /// Get the label samples are recorded under.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run `f` once and record how long it took.
    pub fn time<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = ActiveScope::begin(self.registry, &self.label);
        f()
    }

    /// Wrap a one-argument function. Several arguments can be passed as a tuple.
    ///
    /// The result is only `FnMut`; use [`wrap_fn`](Self::wrap_fn) when the
    /// wrapped function must stay callable through `&self`.
    pub fn wrap<A, R, F>(self, mut f: F) -> impl FnMut(A) -> R + 'r
    where
        F: FnMut(A) -> R + 'r,
    {
        move |arg| self.time(|| f(arg))
    }

    /// Wrap a function that takes no arguments.
    pub fn wrap0<R, F>(self, mut f: F) -> impl FnMut() -> R + 'r
    where
        F: FnMut() -> R + 'r,
    {
        move || self.time(&mut f)
    }

    /// Wrap an `Fn` and keep it `Fn`, e.g. for callbacks shared by reference.
    pub fn wrap_fn<A, R, F>(self, f: F) -> impl Fn(A) -> R + 'r
    where
        F: Fn(A) -> R + 'r,
    {
        move |arg| self.time(|| f(arg))
    }
}
