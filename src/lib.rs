//! # Gesture Predictor
//!
//! A real-time touch-gesture prediction and latency-adaptive quality engine
//! for an interactive on-screen avatar.
//!
//! ## Overview
//!
//! This library observes raw touch samples as they arrive, maintains a
//! per-finger motion history, classifies the in-progress motion into a
//! discrete gesture before the finger lifts, and emits confidence-scored
//! predictions that downstream code uses to react early (pre-animate,
//! pre-fetch, or commit to an action) instead of waiting for gesture
//! completion. A companion subsystem monitors achieved frame latency and
//! environment conditions and derives a latency mode and a matching
//! rendering/audio quality profile.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gesture_predictor::input::types::TouchSample;
//! use gesture_predictor::session::predictor::PredictionSession;
//! use gesture_predictor::time::clock::Timestamp;
//!
//! let mut session = PredictionSession::new();
//!
//! // Feed samples as the platform delivers them
//! session.touch_start(TouchSample::new(1, 0.0, 200.0, Timestamp::from_millis(0)));
//! session.touch_move(TouchSample::new(1, 150.0, 200.0, Timestamp::from_millis(150)));
//!
//! for event in session.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`input`]: Normalized touch records and the lock-free sample queue
//! - [`time`]: Monotonic timestamps and durations
//! - [`trajectory`]: Per-touch motion history and derived kinematics
//! - [`classify`]: The fixed-order gesture classifier and confidence gate
//! - [`session`]: Per-surface prediction lifecycle, events, and metrics
//! - [`latency`]: Frame-time monitoring and latency mode derivation
//! - [`quality`]: Rendering/audio quality profiles and downgrade rules
//! - [`replay`]: Trace recording format and synthetic traces
//! - [`app`]: CLI and configuration management
//!
//! ## Prediction Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ Touch input │───▶│ Trajectory   │───▶│  Gesture    │───▶│ Confidence  │
//! │  (samples)  │    │ Tracker      │    │ Classifier  │    │    Gate     │
//! └─────────────┘    └──────────────┘    └─────────────┘    └─────────────┘
//!                                                                  │
//! ┌─────────────┐    ┌──────────────┐                              ▼
//! │  Quality    │◀───│ Latency      │                       ┌─────────────┐
//! │ Controllers │    │ Monitor      │◀── frame ticks        │ Prediction  │
//! └─────────────┘    └──────────────┘                       │  Session    │
//!                                                           └─────────────┘
//! ```
//!
//! Absence of a prediction is indistinguishable from "no gesture yet":
//! consumers must treat a missing prediction as "wait", never as an error.

pub mod app;
pub mod classify;
pub mod input;
pub mod latency;
pub mod quality;
pub mod replay;
pub mod session;
pub mod time;
pub mod trajectory;

// Re-export commonly used types
pub use classify::classifier::{Classification, GestureClassifier, GestureThresholds};
pub use classify::confidence::{ConfidenceGate, ConfidenceLevel, PredictionMode};
pub use classify::gesture::{Alternate, GestureKind};
pub use input::queue::SampleQueue;
pub use input::types::{TouchEvent, TouchPhase, TouchSample};
pub use latency::budget::LatencyBudget;
pub use latency::monitor::{LatencyBudgetMonitor, LatencyMode, LatencyReport, OptimizationLevel};
pub use quality::audio::{AudioQuality, AudioQualityController, AudioQualityTier};
pub use quality::environment::{ConnectionQuality, DeviceTier, EnvSnapshot};
pub use quality::render::{RenderQuality, RenderQualityController};
pub use replay::trace::TouchTrace;
pub use session::events::{GesturePrediction, PredictionEvent};
pub use session::metrics::PredictorMetrics;
pub use session::predictor::{PredictionSession, PredictorOptions};
pub use time::clock::{Duration, MonoClock, Timestamp};

/// Result type alias for the gesture predictor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the gesture predictor
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Sample queue error: {0}")]
    Queue(String),

    #[error("Trace error: {0}")]
    Trace(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
