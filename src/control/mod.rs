//! Control module: trajectory planning and playback
pub mod playback;
pub mod trajectory;

use self::playback::{PathPlayback, PlaybackState};
use self::trajectory::{ProfileParameters, TrajectoryPlanner};
use crate::common::{Path, Point3, TrajectoryError};
use crate::lifecycle::{LifecycleNode, LifecycleNodeBase, State};
use std::any::Any;
use std::collections::HashMap;
use tracing::info;

/// Control stack owning a planned move and its playback
pub struct ControlStack {
    base: LifecycleNodeBase,
    planner: TrajectoryPlanner,
    start: Point3,
    end: Point3,
    params: ProfileParameters,
    playback: Option<PathPlayback>,
}

impl ControlStack {
    /// Create a new control stack for a move from `start` to `end`
    pub fn new(start: Point3, end: Point3) -> Self {
        ControlStack {
            base: LifecycleNodeBase::new("control_stack"),
            planner: TrajectoryPlanner::new(),
            start,
            end,
            params: ProfileParameters::default(),
            playback: None,
        }
    }

    /// Configure the profile parameters and planner threshold.
    /// Nothing is applied unless every value is accepted.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), TrajectoryError> {
        let mut planner = self.planner.clone();
        let mut profile_params = self.params;
        planner.configure(params)?;
        profile_params.configure(params)?;

        self.planner = planner;
        self.params = profile_params;
        Ok(())
    }

    /// Get the planner used for this move
    pub fn planner(&self) -> &TrajectoryPlanner {
        &self.planner
    }

    /// Get the profile parameters
    pub fn params(&self) -> &ProfileParameters {
        &self.params
    }

    /// Get the current lifecycle state
    pub fn state(&self) -> State {
        self.base.get_state()
    }

    /// The planned path, empty until configured or if planning was rejected
    pub fn path(&self) -> &[Point3] {
        self.playback.as_ref().map(|p| p.path()).unwrap_or(&[])
    }

    /// Advance playback by `delta` seconds. Only moves while active.
    pub fn update(&mut self, delta: f64) -> Option<Point3> {
        if self.base.get_state() != State::Active {
            return self.position();
        }
        let playback = self.playback.as_mut()?;
        let was_finished = playback.is_finished();
        if playback.advance(delta) == PlaybackState::Finished && !was_finished {
            info!("Reached end point {:?}", self.end);
        }
        self.position()
    }

    /// Current position along the path
    pub fn position(&self) -> Option<Point3> {
        match &self.playback {
            Some(playback) if !playback.path().is_empty() => playback.position(),
            _ => Some(self.start),
        }
    }

    /// Whether playback has moved past the last point
    pub fn is_finished(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| p.is_finished())
    }

    fn plan(&self) -> Path {
        self.planner.compute_path(self.start, self.end, &self.params)
    }
}

impl LifecycleNode for ControlStack {
    fn on_configure(&mut self) -> Result<(), TrajectoryError> {
        info!("Configuring {}", self.base.name);
        self.base.transition(State::Inactive)?;
        let path = self.plan();
        info!("Planned path with {} points", path.len());
        self.playback = Some(PathPlayback::new(path, self.params.step_duration));
        Ok(())
    }

    fn on_activate(&mut self) -> Result<(), TrajectoryError> {
        info!("Activating {}", self.base.name);
        self.base.transition(State::Active)
    }

    fn on_deactivate(&mut self) -> Result<(), TrajectoryError> {
        info!("Deactivating {}", self.base.name);
        self.base.transition(State::Inactive)
    }

    fn on_cleanup(&mut self) -> Result<(), TrajectoryError> {
        info!("Cleaning up {}", self.base.name);
        self.base.transition(State::Unconfigured)?;
        self.playback = None;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
