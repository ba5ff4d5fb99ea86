//! Planner configuration and profile tuning parameters

use crate::common::TrajectoryError;
use std::collections::HashMap;

/// Default significance threshold for the tuning scalars
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Planner-wide configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Smallest value (exclusive) accepted for acceleration, deceleration,
    /// max speed and step duration. Squares and reciprocals of values above
    /// this must stay well inside the f64 range.
    pub epsilon: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl PlannerConfig {
    /// Create a configuration with a custom threshold
    pub fn with_epsilon(epsilon: f64) -> Result<Self, TrajectoryError> {
        let epsilon = TrajectoryError::check("epsilon", epsilon, 0.0)?;
        Ok(PlannerConfig { epsilon })
    }

    /// Configure from a parameter map
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), TrajectoryError> {
        if let Some(&epsilon) = params.get("epsilon") {
            self.epsilon = TrajectoryError::check("epsilon", epsilon, 0.0)?;
        }
        Ok(())
    }
}

/// Tuning scalars for a single trapezoidal move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileParameters {
    /// Acceleration rate from rest (units/s²)
    pub acceleration: f64,
    /// Deceleration rate to rest (units/s²)
    pub deceleration: f64,
    /// Requested peak speed (units/s)
    pub max_speed: f64,
    /// Sampling interval (s)
    pub step_duration: f64,
}

impl Default for ProfileParameters {
    fn default() -> Self {
        ProfileParameters {
            acceleration: 1.0,
            deceleration: 1.0,
            max_speed: 1.0,
            step_duration: 0.05,
        }
    }
}

impl ProfileParameters {
    /// Create parameters for a move
    pub fn new(acceleration: f64, deceleration: f64, max_speed: f64, step_duration: f64) -> Self {
        ProfileParameters {
            acceleration,
            deceleration,
            max_speed,
            step_duration,
        }
    }

    /// Check every scalar against the threshold in `config`
    pub fn validate(&self, config: &PlannerConfig) -> Result<(), TrajectoryError> {
        TrajectoryError::check("acceleration", self.acceleration, config.epsilon)?;
        TrajectoryError::check("deceleration", self.deceleration, config.epsilon)?;
        TrajectoryError::check("max_speed", self.max_speed, config.epsilon)?;
        TrajectoryError::check("step_duration", self.step_duration, config.epsilon)?;
        Ok(())
    }

    /// Configure from a parameter map. Unknown keys are ignored.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), TrajectoryError> {
        let mut updated = *self;

        if let Some(&acceleration) = params.get("acceleration") {
            updated.acceleration = TrajectoryError::check("acceleration", acceleration, 0.0)?;
        }

        if let Some(&deceleration) = params.get("deceleration") {
            updated.deceleration = TrajectoryError::check("deceleration", deceleration, 0.0)?;
        }

        if let Some(&max_speed) = params.get("max_speed") {
            updated.max_speed = TrajectoryError::check("max_speed", max_speed, 0.0)?;
        }

        if let Some(&step_duration) = params.get("step_duration") {
            updated.step_duration = TrajectoryError::check("step_duration", step_duration, 0.0)?;
        }

        *self = updated;
        Ok(())
    }
}
