//! Error types

use super::types::Point3;
use crate::lifecycle::State;
use thiserror::Error;

/// Errors reported by the planner and its components
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    /// A tuning scalar is not finite or not above the significance threshold
    #[error("invalid parameter `{name}`: {value} must be finite and greater than {minimum}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        minimum: f64,
    },

    /// An endpoint has a NaN or infinite coordinate
    #[error("endpoint `{name}` must have finite coordinates, got {point:?}")]
    NonFiniteEndpoint { name: &'static str, point: Point3 },

    /// The move is too long to be timed or sampled in f64
    #[error("move of length {distance} over {duration}s cannot be sampled every {step_duration}s")]
    UnboundedProfile {
        distance: f64,
        duration: f64,
        step_duration: f64,
    },

    /// A lifecycle method was called from a state that does not allow it
    #[error("invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition { from: State, to: State },
}

impl TrajectoryError {
    /// Check `value` against `minimum`, rejecting NaN and infinities
    pub fn check(name: &'static str, value: f64, minimum: f64) -> Result<f64, TrajectoryError> {
        if value.is_finite() && value > minimum {
            Ok(value)
        } else {
            Err(TrajectoryError::InvalidParameter {
                name,
                value,
                minimum,
            })
        }
    }
}
