//! Label-keyed Timing Registry
//!
//! This crate measures wall-clock durations of code sections and aggregates
//! them per caller-chosen label:
//! - [`TimingRegistry`] stores samples (seconds) and answers mean, median,
//!   min, max and total queries
//! - Wrapper capture via [`TimingRegistry::make_timer`], which times every
//!   call of a wrapped function
//! - Scoped capture via [`ScopedTimer`] and the [`time_scope!`] macro, which
//!   time a block and record on exit, including early returns and panics
//!
//! Unknown labels are never an error: they read as empty, and every
//! statistic is `0.0`.
//!
//! # Example
//!
//! ```rust
//! use timebank::TimingRegistry;
//!
//! let registry = TimingRegistry::new();
//!
//! let mut parse = registry.make_timer("parse").wrap(|s: &str| s.len());
//! parse("hello");
//!
//! let mut clock = registry.scoped();
//! clock.using_label("render").run(|| {
//!     // ... rendering ...
//! })?;
//!
//! assert_eq!(registry.count("parse"), 1);
//! assert_eq!(registry.count("render"), 1);
//! assert_eq!(registry.mean_time("never_recorded"), 0.0);
//! # Ok::<(), timebank::TimingError>(())
//! ```

mod error;
mod registry;
mod scope;
mod stats;
mod timer;

pub use error::{TimingError, TimingResult};
pub use registry::{global_registry, TimingRegistry};
pub use scope::{ActiveScope, ScopedTimer};
pub use stats::{TimingStats, TimingSummary};
pub use timer::Timer;
