//! Trapezoidal velocity profiles for straight-line moves.
//!
//! A profile accelerates from rest, cruises at the peak speed and decelerates
//! back to rest at the end point. When the requested peak speed cannot be
//! reached over the distance, the cruise phase collapses to zero length and
//! the profile becomes triangular.

use super::config::ProfileParameters;
use crate::common::Point3;

/// Overall shape of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    /// Accelerate, cruise at the requested max speed, decelerate
    Trapezoidal,
    /// Max speed unreachable, accelerate straight into deceleration
    Triangular,
    /// Start and end coincide, nothing moves
    Stationary,
}

/// Phase of the motion at a given time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    Accelerating,
    Cruising,
    Decelerating,
    Done,
}

/// Closed-form velocity profile between two points
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityProfile {
    /// Start position
    pub start: Point3,
    /// End position
    pub end: Point3,
    /// Unit direction from start to end, zero when stationary
    pub direction: Point3,
    /// Straight-line distance
    pub distance: f64,
    /// Acceleration rate
    pub acceleration: f64,
    /// Deceleration rate
    pub deceleration: f64,
    /// Speed actually reached, equal to max speed unless triangular
    pub peak_speed: f64,
    pub accel_distance: f64,
    pub cruise_distance: f64,
    pub decel_distance: f64,
    pub accel_duration: f64,
    pub cruise_duration: f64,
    pub decel_duration: f64,
    pub total_duration: f64,
    pub shape: ProfileShape,
}

impl VelocityProfile {
    /// Build the profile for a move. `params` are expected to be validated.
    pub fn new(start: Point3, end: Point3, params: &ProfileParameters) -> Self {
        let acceleration = params.acceleration;
        let deceleration = params.deceleration;
        let diff = end - start;
        let distance = diff.norm();

        if distance == 0.0 {
            return VelocityProfile {
                start,
                end,
                direction: Point3::zeros(),
                distance,
                acceleration,
                deceleration,
                peak_speed: 0.0,
                accel_distance: 0.0,
                cruise_distance: 0.0,
                decel_distance: 0.0,
                accel_duration: 0.0,
                cruise_duration: 0.0,
                decel_duration: 0.0,
                total_duration: 0.0,
                shape: ProfileShape::Stationary,
            };
        }

        let direction = diff / distance;

        let mut peak_speed = params.max_speed;
        let mut accel_distance = 0.5 * peak_speed * peak_speed / acceleration;
        let mut decel_distance = 0.5 * peak_speed * peak_speed / deceleration;
        let mut cruise_distance = distance - accel_distance - decel_distance;
        let mut shape = ProfileShape::Trapezoidal;

        if cruise_distance < 0.0 {
            peak_speed = (2.0 * distance / (1.0 / acceleration + 1.0 / deceleration)).sqrt();
            accel_distance = 0.5 * peak_speed * peak_speed / acceleration;
            decel_distance = 0.5 * peak_speed * peak_speed / deceleration;
            cruise_distance = 0.0;
            shape = ProfileShape::Triangular;
        }

        let accel_duration = peak_speed / acceleration;
        let decel_duration = peak_speed / deceleration;
        let cruise_duration = cruise_distance / peak_speed;
        let total_duration = accel_duration + cruise_duration + decel_duration;

        VelocityProfile {
            start,
            end,
            direction,
            distance,
            acceleration,
            deceleration,
            peak_speed,
            accel_distance,
            cruise_distance,
            decel_distance,
            accel_duration,
            cruise_duration,
            decel_duration,
            total_duration,
            shape,
        }
    }

    /// Time at which the cruise phase ends and deceleration begins
    pub fn cruise_end_time(&self) -> f64 {
        self.accel_duration + self.cruise_duration
    }

    /// Phase of the motion at time `t` since the start
    pub fn phase_at(&self, t: f64) -> MotionPhase {
        if t >= self.total_duration {
            MotionPhase::Done
        } else if t < self.accel_duration {
            MotionPhase::Accelerating
        } else if t < self.cruise_end_time() {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Position at time `t`. Deceleration is measured backward from the end
    /// so the final approach lands on `end` without accumulated error.
    pub fn position_at(&self, t: f64) -> Point3 {
        let t = t.max(0.0);
        match self.phase_at(t) {
            MotionPhase::Accelerating => {
                let travelled = 0.5 * self.acceleration * t * t;
                self.start + travelled * self.direction
            }
            MotionPhase::Cruising => {
                let travelled = self.accel_distance + (t - self.accel_duration) * self.peak_speed;
                self.start + travelled * self.direction
            }
            MotionPhase::Decelerating => {
                let time_left = self.total_duration - t;
                let remaining = 0.5 * self.deceleration * time_left * time_left;
                self.end - remaining * self.direction
            }
            MotionPhase::Done => self.end,
        }
    }

    /// Speed at time `t`
    pub fn speed_at(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        match self.phase_at(t) {
            MotionPhase::Accelerating => self.acceleration * t,
            MotionPhase::Cruising => self.peak_speed,
            MotionPhase::Decelerating => self.deceleration * (self.total_duration - t),
            MotionPhase::Done => 0.0,
        }
    }
}
