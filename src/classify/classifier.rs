//! In-Progress Gesture Classification
//!
//! Classifies one or two live trajectories into a discrete gesture with a raw
//! probability, before the finger lifts. The decision order is load-bearing:
//! distance-gated checks (tap, long-press) run before velocity-gated checks
//! (swipe, drag) so a short fast jitter cannot satisfy a swipe threshold
//! spuriously, and pinch runs before rotation because scale changes dominate
//! perceptually over small rotations.

use super::gesture::{Alternate, GestureKind};
use crate::time::clock::Timestamp;
use crate::trajectory::tracker::Trajectory;
use serde::{Deserialize, Serialize};

/// Per-gesture detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Maximum duration for a tap, ms
    pub tap_max_duration_ms: f64,
    /// Maximum travel for a tap, px
    pub tap_max_distance_px: f64,
    /// Window after a tap in which a second tap becomes a double-tap, ms
    pub double_tap_max_interval_ms: f64,
    /// Minimum hold for a long-press, ms
    pub long_press_min_duration_ms: f64,
    /// Minimum speed for a swipe, px/ms
    pub swipe_min_velocity: f64,
    /// Minimum travel for a swipe, px
    pub swipe_min_distance_px: f64,
    /// Minimum |scale − 1| for a pinch
    pub pinch_min_scale: f64,
    /// Minimum bearing change for a rotation, degrees
    pub rotate_min_angle_deg: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            tap_max_duration_ms: 200.0,
            tap_max_distance_px: 10.0,
            double_tap_max_interval_ms: 300.0,
            long_press_min_duration_ms: 500.0,
            swipe_min_velocity: 0.5,
            swipe_min_distance_px: 50.0,
            pinch_min_scale: 0.15,
            rotate_min_angle_deg: 15.0,
        }
    }
}

/// A raw classification: gesture, probability, and runner-ups
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// The winning gesture
    pub gesture: GestureKind,
    /// Raw probability in [0, 1]
    pub probability: f64,
    /// Lower-probability runner-ups
    pub alternates: Vec<Alternate>,
}

impl Classification {
    fn new(gesture: GestureKind, probability: f64) -> Self {
        Self {
            gesture,
            probability,
            alternates: Vec::new(),
        }
    }

    fn with_alternate(mut self, gesture: GestureKind, probability: f64) -> Self {
        self.alternates.push(Alternate {
            gesture,
            probability,
        });
        self
    }
}

/// Multi-branch gesture classifier with a fixed decision order
pub struct GestureClassifier {
    /// Detection thresholds
    pub thresholds: GestureThresholds,
}

impl GestureClassifier {
    /// Create with default thresholds
    pub fn new() -> Self {
        Self {
            thresholds: GestureThresholds::default(),
        }
    }

    /// Create with explicit thresholds
    pub fn with_thresholds(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify the in-progress motion.
    ///
    /// `last_tap_at` is the end time of the most recent completed tap, used
    /// for double-tap detection; `now` is the current sample time. Returns
    /// None when no gesture matches (zero or 3+ trajectories included).
    pub fn classify(
        &self,
        trajectories: &[&Trajectory],
        last_tap_at: Option<Timestamp>,
        now: Timestamp,
    ) -> Option<Classification> {
        match trajectories.len() {
            1 => self.classify_single(trajectories[0], last_tap_at, now),
            2 => self.classify_pair(trajectories[0], trajectories[1]),
            _ => None,
        }
    }

    /// Single-touch branch: tap family → long-press → swipe → drag → none.
    fn classify_single(
        &self,
        trajectory: &Trajectory,
        last_tap_at: Option<Timestamp>,
        now: Timestamp,
    ) -> Option<Classification> {
        if trajectory.is_empty() {
            return None;
        }
        let th = &self.thresholds;
        let duration_ms = trajectory.duration.as_millis_f64();
        let distance = trajectory.distance;

        // 1. Tap family (distance-gated, checked before anything velocity-gated)
        if duration_ms < th.tap_max_duration_ms && distance < th.tap_max_distance_px {
            let within_double_window = last_tap_at
                .map(|t| now.duration_since(t).as_millis_f64() <= th.double_tap_max_interval_ms)
                .unwrap_or(false);
            return Some(if within_double_window {
                Classification::new(GestureKind::DoubleTap, 0.85)
                    .with_alternate(GestureKind::Tap, 0.1)
            } else {
                Classification::new(GestureKind::Tap, 0.9)
                    .with_alternate(GestureKind::DoubleTap, 0.1)
            });
        }

        // 2. Long-press: held in place past the minimum duration
        if duration_ms >= th.long_press_min_duration_ms
            && distance < 2.0 * th.tap_max_distance_px
        {
            return Some(
                Classification::new(GestureKind::LongPress, 0.85)
                    .with_alternate(GestureKind::Drag, 0.1),
            );
        }

        // 3. Swipe: fast and far enough, bucketed by heading
        let speed = trajectory.speed_px_per_ms();
        if speed >= th.swipe_min_velocity && distance >= th.swipe_min_distance_px {
            let direction = GestureKind::swipe_for_angle(trajectory.direction);
            let probability = (0.8 + speed * 0.05).min(0.95);
            return Some(
                Classification::new(direction, probability)
                    .with_alternate(GestureKind::Drag, 0.1),
            );
        }

        // 4. Drag fallback: moved beyond tap range but matched nothing above
        if distance > th.tap_max_distance_px {
            let swipe = GestureKind::swipe_for_angle(trajectory.direction);
            return Some(
                Classification::new(GestureKind::Drag, 0.7).with_alternate(swipe, 0.2),
            );
        }

        None
    }

    /// Two-touch branch: pinch → rotation → none.
    ///
    /// Pinch is checked first; a gesture that is simultaneously a strong pinch
    /// and a strong rotation reports pinch and the rotation is never surfaced.
    fn classify_pair(&self, a: &Trajectory, b: &Trajectory) -> Option<Classification> {
        let (a_first, a_last) = (a.first()?, a.last()?);
        let (b_first, b_last) = (b.first()?, b.last()?);

        let initial_span = a_first.distance_to(b_first);
        let current_span = a_last.distance_to(b_last);
        if initial_span <= 0.0 {
            return None;
        }

        // 1. Pinch
        let scale = current_span / initial_span;
        if (scale - 1.0).abs() > self.thresholds.pinch_min_scale {
            let gesture = if scale < 1.0 {
                GestureKind::PinchIn
            } else {
                GestureKind::PinchOut
            };
            return Some(Classification::new(gesture, 0.85));
        }

        // 2. Rotation: signed change in the inter-finger bearing
        let initial_bearing = (b_first.y - a_first.y).atan2(b_first.x - a_first.x);
        let final_bearing = (b_last.y - a_last.y).atan2(b_last.x - a_last.x);
        let rotation_deg = normalize_degrees((final_bearing - initial_bearing).to_degrees());
        if rotation_deg.abs() > self.thresholds.rotate_min_angle_deg {
            // y grows downward, so a positive bearing delta is clockwise
            let gesture = if rotation_deg > 0.0 {
                GestureKind::RotateCw
            } else {
                GestureKind::RotateCcw
            };
            return Some(Classification::new(gesture, 0.8));
        }

        None
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize an angle delta in degrees to (−180, 180].
fn normalize_degrees(mut deg: f64) -> f64 {
    while deg > 180.0 {
        deg -= 360.0;
    }
    while deg <= -180.0 {
        deg += 360.0;
    }
    deg
}
