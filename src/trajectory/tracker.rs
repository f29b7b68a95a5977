//! Per-Touch Trajectory Tracking
//!
//! Maintains a bounded motion history per active touch identifier and derives
//! the kinematics the classifier consumes: velocity, acceleration, direction,
//! straight-line distance, and duration. Derived fields are recomputed on
//! every insert so they are always consistent with the retained window.

use crate::input::types::TouchSample;
use crate::time::clock::Duration;
use std::collections::{HashMap, VecDeque};
use tracing::warn;

/// Default number of retained samples per trajectory
pub const DEFAULT_HISTORY_SIZE: usize = 20;

/// Window over which velocity is estimated
const VELOCITY_WINDOW: usize = 5;

/// Window over which acceleration is estimated
const ACCELERATION_WINDOW: usize = 10;

/// The retained motion history and derived kinematics for one touch
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Touch identifier this trajectory belongs to
    pub id: u64,
    /// Retained samples, oldest first
    samples: VecDeque<TouchSample>,
    /// Velocity over the recent window, px/s
    pub velocity: (f64, f64),
    /// Acceleration over the recent window, px/s²
    pub acceleration: (f64, f64),
    /// Overall heading, radians, first retained sample to last
    pub direction: f64,
    /// Straight-line distance first retained sample to last, px
    pub distance: f64,
    /// Time span of the retained window
    pub duration: Duration,
}

impl Trajectory {
    fn new(id: u64) -> Self {
        Self {
            id,
            samples: VecDeque::with_capacity(DEFAULT_HISTORY_SIZE),
            velocity: (0.0, 0.0),
            acceleration: (0.0, 0.0),
            direction: 0.0,
            distance: 0.0,
            duration: Duration::ZERO,
        }
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the trajectory holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest retained sample
    pub fn first(&self) -> Option<&TouchSample> {
        self.samples.front()
    }

    /// Most recent sample
    pub fn last(&self) -> Option<&TouchSample> {
        self.samples.back()
    }

    /// Iterate retained samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &TouchSample> {
        self.samples.iter()
    }

    /// Speed in px/ms over the retained window (distance / duration).
    /// Zero when the window spans no time.
    pub fn speed_px_per_ms(&self) -> f64 {
        let ms = self.duration.as_millis_f64();
        if ms > 0.0 {
            self.distance / ms
        } else {
            0.0
        }
    }

    fn push(&mut self, sample: TouchSample, history_size: usize) {
        self.samples.push_back(sample);
        while self.samples.len() > history_size {
            self.samples.pop_front();
        }
        self.recompute();
    }

    /// Recompute all derived fields from the current window.
    fn recompute(&mut self) {
        self.velocity = self.window_velocity(VELOCITY_WINDOW);
        self.acceleration = self.window_acceleration(ACCELERATION_WINDOW);

        let (first, last) = match (self.samples.front(), self.samples.back()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => {
                self.direction = 0.0;
                self.distance = 0.0;
                self.duration = Duration::ZERO;
                return;
            }
        };

        self.direction = (last.y - first.y).atan2(last.x - first.x);
        self.distance = first.distance_to(&last);
        self.duration = last.timestamp.duration_since(first.timestamp);
    }

    /// Velocity over the last `window` samples, px/s.
    /// (0, 0) with fewer than 2 samples or zero time delta.
    fn window_velocity(&self, window: usize) -> (f64, f64) {
        let n = self.samples.len();
        if n < 2 {
            return (0.0, 0.0);
        }
        let start = n.saturating_sub(window);
        let first = self.samples[start];
        let last = self.samples[n - 1];

        let dt = last.timestamp.duration_since(first.timestamp).as_secs_f64();
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        ((last.x - first.x) / dt, (last.y - first.y) / dt)
    }

    /// Acceleration over the last `window` samples, px/s².
    ///
    /// Splits the window in half, estimates velocity over each half, and
    /// divides the velocity change by the time between the half midpoints.
    /// (0, 0) with fewer than 3 samples or zero time delta.
    fn window_acceleration(&self, window: usize) -> (f64, f64) {
        let n = self.samples.len();
        if n < 3 {
            return (0.0, 0.0);
        }
        let start = n.saturating_sub(window);
        let slice: Vec<TouchSample> = self.samples.iter().skip(start).copied().collect();
        let half = slice.len() / 2;

        let v1 = segment_velocity(&slice[..half]);
        let v2 = segment_velocity(&slice[half..]);

        let mid1 = segment_midpoint_micros(&slice[..half]);
        let mid2 = segment_midpoint_micros(&slice[half..]);
        let dt = (mid2.saturating_sub(mid1)) as f64 / 1_000_000.0;
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        ((v2.0 - v1.0) / dt, (v2.1 - v1.1) / dt)
    }
}

/// Velocity over a run of samples, px/s; (0, 0) for degenerate runs.
fn segment_velocity(samples: &[TouchSample]) -> (f64, f64) {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return (0.0, 0.0),
    };
    let dt = last.timestamp.duration_since(first.timestamp).as_secs_f64();
    if dt <= 0.0 {
        return (0.0, 0.0);
    }
    ((last.x - first.x) / dt, (last.y - first.y) / dt)
}

/// Midpoint timestamp of a run of samples, in micros.
fn segment_midpoint_micros(samples: &[TouchSample]) -> u64 {
    match (samples.first(), samples.last()) {
        (Some(f), Some(l)) => (f.timestamp.micros() + l.timestamp.micros()) / 2,
        _ => 0,
    }
}

/// Tracks one trajectory per active touch identifier
pub struct TrajectoryTracker {
    trajectories: HashMap<u64, Trajectory>,
    history_size: usize,
}

impl TrajectoryTracker {
    /// Create a tracker with the default history size
    pub fn new() -> Self {
        Self::with_history_size(DEFAULT_HISTORY_SIZE)
    }

    /// Create a tracker retaining `history_size` samples per touch
    pub fn with_history_size(history_size: usize) -> Self {
        Self {
            trajectories: HashMap::new(),
            history_size: history_size.max(2),
        }
    }

    /// Append a sample to its touch's trajectory, creating it if absent.
    ///
    /// Samples older than the trajectory's newest retained sample violate the
    /// monotonicity contract and are dropped with a warning.
    pub fn add_sample(&mut self, sample: TouchSample) {
        let trajectory = self
            .trajectories
            .entry(sample.id)
            .or_insert_with(|| Trajectory::new(sample.id));

        if let Some(last) = trajectory.last() {
            if sample.timestamp < last.timestamp {
                warn!(
                    touch_id = sample.id,
                    sample_us = sample.timestamp.micros(),
                    last_us = last.timestamp.micros(),
                    "ignoring out-of-order touch sample"
                );
                return;
            }
        }

        trajectory.push(sample, self.history_size);
    }

    /// Delete a touch's trajectory. No-op for unknown ids.
    pub fn remove_touch(&mut self, id: u64) {
        self.trajectories.remove(&id);
    }

    /// Look up a trajectory by touch id
    pub fn get(&self, id: u64) -> Option<&Trajectory> {
        self.trajectories.get(&id)
    }

    /// Active trajectories sorted by touch id (deterministic order)
    pub fn active(&self) -> Vec<&Trajectory> {
        let mut list: Vec<&Trajectory> = self.trajectories.values().collect();
        list.sort_by_key(|t| t.id);
        list
    }

    /// Number of active touches
    pub fn active_count(&self) -> usize {
        self.trajectories.len()
    }

    /// Drop all trajectories
    pub fn clear(&mut self) {
        self.trajectories.clear();
    }

    /// Extrapolate a trajectory's position `horizon_ms` into the future using
    /// constant-acceleration kinematics: p + v·t + ½·a·t².
    ///
    /// Returns None for an empty trajectory.
    pub fn predict_end_point(trajectory: &Trajectory, horizon_ms: f64) -> Option<(f64, f64)> {
        let last = trajectory.last()?;
        let t = horizon_ms / 1_000.0;
        let (vx, vy) = trajectory.velocity;
        let (ax, ay) = trajectory.acceleration;
        Some((
            last.x + vx * t + 0.5 * ax * t * t,
            last.y + vy * t + 0.5 * ay * t * t,
        ))
    }
}

impl Default for TrajectoryTracker {
    fn default() -> Self {
        Self::new()
    }
}
