//! Trajectory generation module
pub mod config;
pub mod profile;

pub use self::config::{PlannerConfig, ProfileParameters, DEFAULT_EPSILON};
pub use self::profile::{MotionPhase, ProfileShape, VelocityProfile};

use crate::common::{Path, Point3, TrajectoryError};
use std::collections::HashMap;
use tracing::{debug, warn};

// Upper bound on the up-front allocation for a sampled path
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

// Step indices above 2^53 no longer convert to f64 exactly
const MAX_STEP_INDEX: f64 = 9_007_199_254_740_992.0;

/// A trajectory planner for straight-line moves with a trapezoidal velocity profile
#[derive(Debug, Clone, Default)]
pub struct TrajectoryPlanner {
    config: PlannerConfig,
}

impl TrajectoryPlanner {
    /// Create a new trajectory planner with the default threshold
    pub fn new() -> Self {
        TrajectoryPlanner {
            config: PlannerConfig::default(),
        }
    }

    /// Create a planner with a specific configuration
    pub fn with_config(config: PlannerConfig) -> Self {
        TrajectoryPlanner { config }
    }

    /// The active planner configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Configure the planner with parameters
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), TrajectoryError> {
        self.config.configure(params)
    }

    /// Validate the parameters and build the velocity profile for a move
    pub fn profile(
        &self,
        start: Point3,
        end: Point3,
        params: &ProfileParameters,
    ) -> Result<VelocityProfile, TrajectoryError> {
        params.validate(&self.config)?;
        check_endpoint("start", start)?;
        check_endpoint("end", end)?;

        let profile = VelocityProfile::new(start, end, params);
        let sample_count = profile.total_duration / params.step_duration;
        if !profile.distance.is_finite() || !(sample_count < MAX_STEP_INDEX) {
            return Err(TrajectoryError::UnboundedProfile {
                distance: profile.distance,
                duration: profile.total_duration,
                step_duration: params.step_duration,
            });
        }
        debug!(
            "Profile {:?}: distance={}, peak_speed={}, duration={}",
            profile.shape, profile.distance, profile.peak_speed, profile.total_duration
        );
        Ok(profile)
    }

    /// Lazily sample a move. The iterator can be cloned to restart it.
    pub fn samples(
        &self,
        start: Point3,
        end: Point3,
        params: &ProfileParameters,
    ) -> Result<PathSamples, TrajectoryError> {
        let profile = self.profile(start, end, params)?;
        Ok(PathSamples::new(profile, params.step_duration))
    }

    /// Sample a move, returning the error for invalid parameters
    pub fn try_compute_path(
        &self,
        start: Point3,
        end: Point3,
        params: &ProfileParameters,
    ) -> Result<Path, TrajectoryError> {
        let samples = self.samples(start, end, params)?;
        let mut path = Vec::with_capacity(samples.estimated_len());
        path.extend(samples);
        debug!("Sampled path with {} points", path.len());
        Ok(path)
    }

    /// Sample a move from `start` to `end`.
    ///
    /// Invalid parameters are logged and produce an empty path; callers treat
    /// an empty path as "no trajectory".
    pub fn compute_path(&self, start: Point3, end: Point3, params: &ProfileParameters) -> Path {
        match self.try_compute_path(start, end, params) {
            Ok(path) => path,
            Err(e) => {
                warn!("Trajectory planning rejected: {}", e);
                Vec::new()
            }
        }
    }
}

fn check_endpoint(name: &'static str, point: Point3) -> Result<(), TrajectoryError> {
    if point.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(TrajectoryError::NonFiniteEndpoint { name, point })
    }
}

/// Sample a move with the default planner configuration
pub fn compute_path(
    start: Point3,
    end: Point3,
    acceleration: f64,
    deceleration: f64,
    max_speed: f64,
    step_duration: f64,
) -> Path {
    let params = ProfileParameters::new(acceleration, deceleration, max_speed, step_duration);
    TrajectoryPlanner::new().compute_path(start, end, &params)
}

/// Iterator over the sampled positions of a profile.
///
/// Sample `k` is taken at `k * step_duration` while that is before the end of
/// the profile, followed by the exact end point.
#[derive(Debug, Clone)]
pub struct PathSamples {
    profile: VelocityProfile,
    step_duration: f64,
    step_index: u64,
    finished: bool,
}

impl PathSamples {
    fn new(profile: VelocityProfile, step_duration: f64) -> Self {
        PathSamples {
            profile,
            step_duration,
            step_index: 0,
            finished: false,
        }
    }

    /// The profile being sampled
    pub fn profile(&self) -> &VelocityProfile {
        &self.profile
    }

    fn estimated_len(&self) -> usize {
        let steps = (self.profile.total_duration / self.step_duration).ceil();
        if steps.is_finite() && steps < MAX_PREALLOCATED_SAMPLES as f64 {
            steps as usize + 1
        } else {
            MAX_PREALLOCATED_SAMPLES
        }
    }
}

impl Iterator for PathSamples {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        if self.finished {
            return None;
        }

        if self.profile.shape == ProfileShape::Stationary {
            self.finished = true;
            return Some(self.profile.start);
        }

        // Derived from the index rather than accumulated to avoid drift
        let time = self.step_index as f64 * self.step_duration;
        if time < self.profile.total_duration {
            self.step_index += 1;
            return Some(self.profile.position_at(time));
        }

        self.finished = true;
        Some(self.profile.end)
    }
}

impl std::iter::FusedIterator for PathSamples {}
