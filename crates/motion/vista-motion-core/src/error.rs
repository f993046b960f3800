//! Errors at the controller boundary.
//!
//! Animation itself never fails; these only describe malformed host input
//! (configuration payloads) that adapters must reject before a controller
//! exists.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MotionError {
    #[error("invalid observer threshold {0} (expected 0.0..=1.0)")]
    Threshold(f64),

    #[error("invalid {field}: {value} (expected a finite, non-negative number)")]
    NonNegative { field: &'static str, value: f64 },

    #[error("class name for {0} must be non-empty and contain no whitespace")]
    ClassName(&'static str),
}
