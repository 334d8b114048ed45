//! Error types for the simulation engine

use thiserror::Error;

/// Result alias used throughout the crate
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation engine and its loaders
#[derive(Error, Debug)]
pub enum SimError {
    /// Rate at or below -100% per period, or not a finite number
    #[error("Invalid rate for {name}: {value}")]
    InvalidRate {
        /// Which parameter carried the rate
        name: &'static str,
        value: f64,
    },

    /// The closed-form annuity formula divides by the periodic rate
    #[error("Zero rate requires the linear formula")]
    ZeroRateRequiresLinearFormula,

    /// Malformed input: empty grids, zero durations, non-finite amounts
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        SimError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Reject non-finite amounts before they reach a recurrence
pub(crate) fn ensure_finite(name: &str, value: f64) -> SimResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid_argument(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

/// Reject zero-length simulations
pub(crate) fn ensure_months(name: &str, months: u32) -> SimResult<()> {
    if months == 0 {
        Err(SimError::invalid_argument(format!(
            "{} must be at least 1 month",
            name
        )))
    } else {
        Ok(())
    }
}
