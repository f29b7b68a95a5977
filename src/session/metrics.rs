//! Prediction Accuracy Metrics
//!
//! Session-wide counters comparing emitted predictions against
//! later-confirmed ground truth. Mutated only by the owning session; reset
//! only by an explicit control call.

use crate::classify::gesture::GestureKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accuracy and volume counters for one prediction session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictorMetrics {
    /// Predictions emitted
    pub total_predictions: u64,
    /// Predictions later confirmed correct
    pub correct_predictions: u64,
    /// Predictions later confirmed incorrect or rejected
    pub incorrect_predictions: u64,
    /// Completed gestures by final classification
    pub by_gesture: HashMap<GestureKind, u64>,
    confidence_sum: f64,
    latency_sum_ms: f64,
}

impl PredictorMetrics {
    /// Create zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one emitted prediction with its probability and the elapsed
    /// time from gesture start to emission.
    pub fn record_prediction(&mut self, probability: f64, latency_ms: f64) {
        self.total_predictions += 1;
        self.confidence_sum += probability;
        self.latency_sum_ms += latency_ms;
    }

    /// Record a completed gesture's final classification
    pub fn record_gesture(&mut self, gesture: GestureKind) {
        *self.by_gesture.entry(gesture).or_insert(0) += 1;
    }

    /// Record a confirmed-correct prediction
    pub fn record_correct(&mut self) {
        self.correct_predictions += 1;
    }

    /// Record a confirmed-incorrect or rejected prediction
    pub fn record_incorrect(&mut self) {
        self.incorrect_predictions += 1;
    }

    /// correct / (correct + incorrect); 0 before any confirmation
    pub fn accuracy(&self) -> f64 {
        let scored = self.correct_predictions + self.incorrect_predictions;
        if scored == 0 {
            0.0
        } else {
            self.correct_predictions as f64 / scored as f64
        }
    }

    /// Mean probability across emitted predictions
    pub fn average_confidence(&self) -> f64 {
        if self.total_predictions == 0 {
            0.0
        } else {
            self.confidence_sum / self.total_predictions as f64
        }
    }

    /// Mean gesture-start-to-emission latency, ms
    pub fn average_latency_ms(&self) -> f64 {
        if self.total_predictions == 0 {
            0.0
        } else {
            self.latency_sum_ms / self.total_predictions as f64
        }
    }

    /// Explicit reset of all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
