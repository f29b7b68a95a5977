//! Prediction Session State Machine
//!
//! Owns the per-touch lifecycle: trajectories, the long-press deadline,
//! double-tap recency, the latest prediction, and accuracy metrics. All state
//! transitions happen synchronously inside the mutating call; events are
//! queued and drained by the consumer after each callback.

use crate::classify::classifier::{Classification, GestureClassifier, GestureThresholds};
use crate::classify::confidence::{ConfidenceGate, ConfidenceLevel, PredictionMode};
use crate::classify::gesture::GestureKind;
use crate::input::types::{TouchEvent, TouchPhase, TouchSample};
use crate::session::events::{GesturePrediction, PredictionEvent};
use crate::session::metrics::PredictorMetrics;
use crate::session::preload::{PreloadCache, DEFAULT_PRELOAD_CAPACITY};
use crate::time::clock::{Duration, Timestamp};
use crate::trajectory::tracker::{TrajectoryTracker, DEFAULT_HISTORY_SIZE};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Tunable options for one prediction session
#[derive(Debug, Clone)]
pub struct PredictorOptions {
    /// Operating mode for act/surface thresholds
    pub mode: PredictionMode,
    /// Classifier thresholds
    pub thresholds: GestureThresholds,
    /// End-point extrapolation horizon, ms
    pub prediction_horizon_ms: f64,
    /// Explicit action threshold overriding the mode's, when set
    pub min_confidence_to_act: Option<f64>,
    /// Retained samples per trajectory
    pub history_size: usize,
    /// Kill-switch; a disabled session ignores every sample
    pub enabled: bool,
    /// Preload cache capacity
    pub max_preloaded_animations: usize,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            mode: PredictionMode::Balanced,
            thresholds: GestureThresholds::default(),
            prediction_horizon_ms: 100.0,
            min_confidence_to_act: None,
            history_size: DEFAULT_HISTORY_SIZE,
            enabled: true,
            max_preloaded_animations: DEFAULT_PRELOAD_CAPACITY,
        }
    }
}

/// Armed long-press deadline for the session's primary touch
#[derive(Debug, Clone, Copy)]
struct LongPressArm {
    touch_id: u64,
    deadline: Timestamp,
}

/// Per-surface gesture prediction session
///
/// Single-threaded by contract: the host delivers touch callbacks and frame
/// ticks one at a time, in arrival order. There are no fatal error paths;
/// malformed input (unknown ids, zero deltas) resolves to defined no-ops.
pub struct PredictionSession {
    options: PredictorOptions,
    tracker: TrajectoryTracker,
    classifier: GestureClassifier,
    gate: ConfidenceGate,
    events: VecDeque<PredictionEvent>,
    last_prediction: Option<GesturePrediction>,
    last_confidence: ConfidenceLevel,
    last_gesture: Option<GestureKind>,
    last_tap_at: Option<Timestamp>,
    gesture_started_at: Option<Timestamp>,
    long_press: Option<LongPressArm>,
    metrics: PredictorMetrics,
    preload: PreloadCache,
}

impl PredictionSession {
    /// Create a session with default options
    pub fn new() -> Self {
        Self::with_options(PredictorOptions::default())
    }

    /// Create a session with explicit options
    pub fn with_options(options: PredictorOptions) -> Self {
        let mut gate = ConfidenceGate::new(options.mode);
        if let Some(threshold) = options.min_confidence_to_act {
            gate = gate.with_act_threshold(threshold);
        }
        Self {
            tracker: TrajectoryTracker::with_history_size(options.history_size),
            classifier: GestureClassifier::with_thresholds(options.thresholds),
            gate,
            events: VecDeque::new(),
            last_prediction: None,
            last_confidence: ConfidenceLevel::None,
            last_gesture: None,
            last_tap_at: None,
            gesture_started_at: None,
            long_press: None,
            preload: PreloadCache::with_capacity(options.max_preloaded_animations),
            metrics: PredictorMetrics::new(),
            options,
        }
    }

    /// Dispatch a touch event to the matching handler
    pub fn handle(&mut self, event: &TouchEvent) {
        match event.phase {
            TouchPhase::Start => self.touch_start(event.sample),
            TouchPhase::Move => self.touch_move(event.sample),
            TouchPhase::End => self.touch_end(event.sample),
            TouchPhase::Cancel => self.touch_cancel(event.sample),
        }
    }

    /// First sample of a new touch.
    ///
    /// Entering the session (idle → tracking) records gesture-start and arms
    /// the long-press deadline for this touch, clearing any stale deadline
    /// first so a timer from a replaced touch can never fire.
    pub fn touch_start(&mut self, sample: TouchSample) {
        if !self.options.enabled {
            return;
        }

        if self.tracker.active_count() == 0 {
            debug!(touch_id = sample.id, "gesture session started");
            self.gesture_started_at = Some(sample.timestamp);
            self.long_press = Some(LongPressArm {
                touch_id: sample.id,
                deadline: sample.timestamp.offset(Duration::from_micros(
                    (self.options.thresholds.long_press_min_duration_ms * 1_000.0) as u64,
                )),
            });
            self.events
                .push_back(PredictionEvent::GestureStarted { touch_id: sample.id });
        }

        self.tracker.add_sample(sample);
        self.run_prediction(sample.timestamp);
    }

    /// Subsequent sample of an active touch
    pub fn touch_move(&mut self, sample: TouchSample) {
        if !self.options.enabled {
            return;
        }
        self.tracker.add_sample(sample);
        self.run_prediction(sample.timestamp);
    }

    /// Touch lifted: final classification, metrics, cleanup.
    ///
    /// Unknown ids are a silent no-op.
    pub fn touch_end(&mut self, sample: TouchSample) {
        if !self.options.enabled || self.tracker.get(sample.id).is_none() {
            return;
        }

        self.disarm_long_press_for(sample.id);
        self.tracker.add_sample(sample);

        let classification = self.classifier.classify(
            &self.tracker.active(),
            self.last_tap_at,
            sample.timestamp,
        );
        let final_gesture = classification.map(|c| c.gesture);

        if let Some(gesture) = final_gesture {
            self.last_gesture = Some(gesture);
            self.metrics.record_gesture(gesture);
            if gesture == GestureKind::Tap {
                self.last_tap_at = Some(sample.timestamp);
            }
        }

        let was_tracked_correctly = match (&self.last_prediction, final_gesture) {
            (Some(p), Some(g)) => p.gesture == g,
            _ => false,
        };
        self.events.push_back(PredictionEvent::GestureEnded {
            gesture: final_gesture,
            was_tracked_correctly,
        });

        self.tracker.remove_touch(sample.id);
        if self.tracker.active_count() == 0 {
            self.clear_prediction_state();
        }
    }

    /// Touch aborted by the platform: cleanup without classification or
    /// metrics. Unknown ids are a silent no-op.
    pub fn touch_cancel(&mut self, sample: TouchSample) {
        if !self.options.enabled || self.tracker.get(sample.id).is_none() {
            return;
        }

        self.disarm_long_press_for(sample.id);
        self.tracker.remove_touch(sample.id);
        if self.tracker.active_count() == 0 {
            self.clear_prediction_state();
        }
    }

    /// Frame tick: polls the long-press deadline.
    ///
    /// When the deadline passes and the armed trajectory is still within
    /// hold range, a synthetic long-press prediction is emitted at fixed
    /// high confidence, independent of the per-sample classification path.
    pub fn on_frame(&mut self, now: Timestamp) {
        if !self.options.enabled {
            return;
        }
        let Some(arm) = self.long_press else {
            return;
        };
        if now < arm.deadline {
            return;
        }
        // Fires at most once per arming
        self.long_press = None;

        let predicted_end_point = {
            let Some(trajectory) = self.tracker.get(arm.touch_id) else {
                return;
            };
            if trajectory.distance >= 2.0 * self.options.thresholds.tap_max_distance_px {
                trace!(touch_id = arm.touch_id, "long-press suppressed: finger moved");
                return;
            }
            TrajectoryTracker::predict_end_point(trajectory, self.options.prediction_horizon_ms)
        };

        let duration_ms = now
            .duration_since(self.gesture_started_at.unwrap_or(now))
            .as_millis_f64();
        let prediction = GesturePrediction {
            gesture: GestureKind::LongPress,
            confidence: ConfidenceLevel::High,
            probability: 0.9,
            predicted_end_point,
            predicted_duration_ms: duration_ms + self.options.prediction_horizon_ms,
            alternates: Vec::new(),
            should_act: self.gate.should_act(0.9),
        };
        self.emit_prediction(prediction, duration_ms);
    }

    /// Score the last prediction against confirmed ground truth
    pub fn confirm_gesture(&mut self, gesture: GestureKind) {
        let Some(prediction) = &self.last_prediction else {
            return;
        };
        if prediction.gesture == gesture {
            self.metrics.record_correct();
        } else {
            self.metrics.record_incorrect();
        }
    }

    /// Count the current prediction as wrong and clear it
    pub fn reject_prediction(&mut self) {
        self.metrics.record_incorrect();
        self.last_prediction = None;
        self.last_confidence = ConfidenceLevel::None;
    }

    /// Clear trajectories, predictions, timers, and the double-tap recency
    /// timestamp. Accumulated metrics survive; idempotent.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.clear_prediction_state();
        self.last_tap_at = None;
        self.last_gesture = None;
        self.events.clear();
    }

    /// Tear down the session (unmount equivalent). Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.reset();
    }

    /// Drain queued events in firing order
    pub fn drain_events(&mut self) -> Vec<PredictionEvent> {
        self.events.drain(..).collect()
    }

    /// Latest retained prediction, if any
    pub fn last_prediction(&self) -> Option<&GesturePrediction> {
        self.last_prediction.as_ref()
    }

    /// Final classification of the most recently completed gesture
    pub fn last_gesture(&self) -> Option<GestureKind> {
        self.last_gesture
    }

    /// Accuracy metrics
    pub fn metrics(&self) -> &PredictorMetrics {
        &self.metrics
    }

    /// Explicit metrics reset (the only way counters are cleared)
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Number of currently tracked touches
    pub fn active_touches(&self) -> usize {
        self.tracker.active_count()
    }

    /// Animations currently preloaded ahead of predicted gestures
    pub fn preload_cache(&self) -> &PreloadCache {
        &self.preload
    }

    fn disarm_long_press_for(&mut self, touch_id: u64) {
        if self.long_press.map(|arm| arm.touch_id) == Some(touch_id) {
            self.long_press = None;
        }
    }

    fn clear_prediction_state(&mut self) {
        self.last_prediction = None;
        self.last_confidence = ConfidenceLevel::None;
        self.gesture_started_at = None;
        self.long_press = None;
    }

    /// Re-run classification and emit the per-sample event sequence.
    fn run_prediction(&mut self, now: Timestamp) {
        let (classification, predicted_end_point, duration_ms) = {
            let trajectories = self.tracker.active();
            let classification = self
                .classifier
                .classify(&trajectories, self.last_tap_at, now);
            let primary = trajectories.first().copied();
            let predicted_end_point = primary.and_then(|t| {
                TrajectoryTracker::predict_end_point(t, self.options.prediction_horizon_ms)
            });
            let duration_ms = primary.map(|t| t.duration.as_millis_f64()).unwrap_or(0.0);
            (classification, predicted_end_point, duration_ms)
        };

        let Some(Classification {
            gesture,
            probability,
            alternates,
        }) = classification
        else {
            return;
        };

        // Below the mode's surface threshold the result stays internal
        if !self.gate.should_surface(probability) {
            trace!(%gesture, probability, "prediction below surface threshold");
            return;
        }

        let prediction = GesturePrediction {
            gesture,
            confidence: self.gate.level(probability),
            probability,
            predicted_end_point,
            predicted_duration_ms: duration_ms + self.options.prediction_horizon_ms,
            alternates,
            should_act: self.gate.should_act(probability),
        };

        let latency_ms = self
            .gesture_started_at
            .map(|start| now.duration_since(start).as_millis_f64())
            .unwrap_or(0.0);
        self.emit_prediction(prediction, latency_ms);
    }

    /// Queue the prediction and its derived events, in contract order.
    fn emit_prediction(&mut self, prediction: GesturePrediction, latency_ms: f64) {
        self.metrics
            .record_prediction(prediction.probability, latency_ms);

        let confidence = prediction.confidence;
        let gesture = prediction.gesture;
        let should_act = prediction.should_act;

        self.events
            .push_back(PredictionEvent::Prediction(prediction.clone()));
        if confidence != self.last_confidence {
            self.events
                .push_back(PredictionEvent::ConfidenceChanged(confidence));
            self.last_confidence = confidence;
        }
        if should_act {
            self.events
                .push_back(PredictionEvent::ActionTriggered(gesture));
            self.preload.insert(gesture.as_str(), prediction.probability);
        }
        self.last_prediction = Some(prediction);
    }
}

impl Default for PredictionSession {
    fn default() -> Self {
        Self::new()
    }
}
