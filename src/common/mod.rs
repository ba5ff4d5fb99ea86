//! Common utilities and types for trajectory planning
pub mod error;

/// Common types and utilities used across the codebase
pub mod types {
    use nalgebra::Vector3;

    /// A 3D point or direction
    pub type Point3 = Vector3<f64>;

    /// Sampled positions ordered by time, start first and end last
    pub type Path = Vec<Point3>;
}

pub use self::error::TrajectoryError;
pub use self::types::{Path, Point3};
