//! Trajectory tracking and kinematic derivation
//!
//! Transforms the raw touch sample stream into per-finger motion histories
//! with velocity, acceleration, heading, and extrapolated end points.

pub mod tracker;

pub use tracker::{Trajectory, TrajectoryTracker, DEFAULT_HISTORY_SIZE};
