//! Prediction Event Taxonomy
//!
//! Discrete event messages emitted by the session. Consumers drain them after
//! each callback; the firing order per sample is part of the contract:
//! gesture-started (session entry only), then the raw prediction, then a
//! confidence-change when the level moved, then an action trigger when the
//! gate cleared.

use crate::classify::confidence::ConfidenceLevel;
use crate::classify::gesture::{Alternate, GestureKind};
use serde::{Deserialize, Serialize};

/// A confidence-scored gesture prediction
///
/// Produced fresh on every sample; only the latest one is retained by the
/// session, for later confirm/reject scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GesturePrediction {
    /// Predicted gesture
    pub gesture: GestureKind,
    /// Qualitative confidence bucket
    pub confidence: ConfidenceLevel,
    /// Raw probability in [0, 1]
    pub probability: f64,
    /// Extrapolated finger position at the prediction horizon
    pub predicted_end_point: Option<(f64, f64)>,
    /// Estimated total gesture duration, ms
    pub predicted_duration_ms: f64,
    /// Lower-probability runner-ups
    pub alternates: Vec<Alternate>,
    /// Whether the confidence gate cleared the action threshold
    pub should_act: bool,
}

/// Discrete events emitted by a prediction session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredictionEvent {
    /// A new gesture session began (first touch while idle)
    GestureStarted {
        /// Touch id that opened the session
        touch_id: u64,
    },
    /// A fresh prediction was produced
    Prediction(GesturePrediction),
    /// The confidence level changed relative to the previous emission
    ConfidenceChanged(ConfidenceLevel),
    /// The gate cleared the action threshold for this gesture
    ActionTriggered(GestureKind),
    /// A touch lifted and the final classification was recorded
    GestureEnded {
        /// Final classified gesture, if any
        gesture: Option<GestureKind>,
        /// Whether the final classification matched the last emitted prediction
        was_tracked_correctly: bool,
    },
}
