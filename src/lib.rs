pub mod common;
pub mod control;
pub mod lifecycle;

pub use crate::common::{Path, Point3, TrajectoryError};
pub use crate::control::trajectory::{compute_path, ProfileParameters, TrajectoryPlanner};

use crate::control::ControlStack;
use crate::lifecycle::LifecycleNode;

/// Registry driving the lifecycle of trajectory components
pub struct TrajectoryCore {
    components: Vec<Box<dyn LifecycleNode>>,
}

impl Default for TrajectoryCore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectoryCore {
    /// Create a new instance of TrajectoryCore
    pub fn new() -> Self {
        TrajectoryCore {
            components: Vec::new(),
        }
    }

    /// Register a component with the core
    pub fn register<T: LifecycleNode + 'static>(&mut self, component: T) {
        self.components.push(Box::new(component));
    }

    /// Initialize all registered components
    pub fn init(&mut self) -> Result<(), TrajectoryError> {
        for component in &mut self.components {
            component.on_configure()?;
            component.on_activate()?;
        }
        Ok(())
    }

    /// Shutdown all registered components
    pub fn shutdown(&mut self) -> Result<(), TrajectoryError> {
        for component in &mut self.components {
            component.on_deactivate()?;
            component.on_cleanup()?;
        }
        Ok(())
    }

    /// Get a reference to the first registered control stack
    pub fn control_stack_mut(&mut self) -> Option<&mut ControlStack> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<ControlStack>())
    }
}
