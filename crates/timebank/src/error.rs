//! Error types for the timing registry.

use thiserror::Error;

/// Errors that can occur while capturing or recording timings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimingError {
    /// A scope was entered on a handle that was never given a label
    #[error("Label must be set with `using_label` before entering a timing scope")]
    MissingLabel,

    /// A sample was negative, NaN or infinite
    #[error("Invalid duration for label '{label}': {value}")]
    InvalidDuration { label: String, value: f64 },
}

/// Result type for timing operations.
pub type TimingResult<T> = Result<T, TimingError>;
