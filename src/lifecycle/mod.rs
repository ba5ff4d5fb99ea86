//! Lifecycle management for trajectory components

use crate::common::TrajectoryError;
use std::any::Any;

/// Trait for components that follow a lifecycle pattern
pub trait LifecycleNode: Send + Sync {
    /// Configure the node
    fn on_configure(&mut self) -> Result<(), TrajectoryError>;

    /// Activate the node
    fn on_activate(&mut self) -> Result<(), TrajectoryError>;

    /// Deactivate the node
    fn on_deactivate(&mut self) -> Result<(), TrajectoryError>;

    /// Clean up the node
    fn on_cleanup(&mut self) -> Result<(), TrajectoryError>;

    /// Convert to Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Base implementation for lifecycle nodes
#[derive(Debug)]
pub struct LifecycleNodeBase {
    pub name: String,
    state: State,
}

/// State of a lifecycle node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unconfigured,
    Inactive,
    Active,
}

impl LifecycleNodeBase {
    /// Create a new lifecycle node base
    pub fn new(name: &str) -> Self {
        LifecycleNodeBase {
            name: name.to_string(),
            state: State::Unconfigured,
        }
    }

    /// Get the current state
    pub fn get_state(&self) -> State {
        self.state
    }

    /// Move to `to` if the current state allows it
    pub fn transition(&mut self, to: State) -> Result<(), TrajectoryError> {
        let allowed = matches!(
            (self.state, to),
            (State::Unconfigured, State::Inactive)
                | (State::Inactive, State::Active)
                | (State::Active, State::Inactive)
                | (State::Inactive, State::Unconfigured)
        );
        if !allowed {
            return Err(TrajectoryError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}
