//! Step-wise playback of a sampled path

use crate::common::{Path, Point3};
use tracing::info;

/// Progress of a playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Showing the sample at this index
    Playing(usize),
    /// Past the last sample, parked on the final point
    Finished,
}

/// Plays a path back one sample per step duration.
///
/// The owner feeds elapsed time deltas; the playback never reads a clock and
/// never modifies the path.
#[derive(Debug, Clone)]
pub struct PathPlayback {
    path: Path,
    step_duration: f64,
    elapsed: f64,
    state: PlaybackState,
}

impl PathPlayback {
    /// Create a new playback positioned on the first sample
    pub fn new(path: Path, step_duration: f64) -> Self {
        let state = if path.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing(0)
        };
        PathPlayback {
            path,
            step_duration,
            elapsed: 0.0,
            state,
        }
    }

    /// Advance by `delta` seconds and return the new state
    pub fn advance(&mut self, delta: f64) -> PlaybackState {
        if self.state == PlaybackState::Finished {
            return self.state;
        }

        self.elapsed += delta.max(0.0);
        let index = (self.elapsed / self.step_duration).floor();
        self.state = if index.is_finite() && index < self.path.len() as f64 {
            PlaybackState::Playing(index as usize)
        } else {
            info!("Playback finished after {:.3}s", self.elapsed);
            PlaybackState::Finished
        };
        self.state
    }

    /// Current position, or `None` for an empty path
    pub fn position(&self) -> Option<Point3> {
        match self.state {
            PlaybackState::Playing(index) => self.path.get(index).copied(),
            PlaybackState::Finished => self.path.last().copied(),
        }
    }

    /// Current progress
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the last point has been passed
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Total time fed in so far, in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The path being played
    pub fn path(&self) -> &[Point3] {
        &self.path
    }

    /// Rewind to the first sample
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.state = if self.path.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing(0)
        };
    }
}
