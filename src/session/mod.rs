//! Prediction session orchestration
//!
//! Owns the per-touch lifecycle and everything derived from it: trajectory
//! tracking, classification, confidence gating, the long-press deadline,
//! emitted events, accuracy metrics, and the animation preload cache.

pub mod events;
pub mod metrics;
pub mod predictor;
pub mod preload;

pub use events::{GesturePrediction, PredictionEvent};
pub use metrics::PredictorMetrics;
pub use predictor::{PredictionSession, PredictorOptions};
pub use preload::PreloadCache;
