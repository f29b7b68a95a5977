//! Gesture classification
//!
//! This module turns live trajectories into confidence-scored gesture
//! predictions using:
//! - A fixed-order multi-branch classifier (tap family, long-press, swipe,
//!   drag; pinch, rotation)
//! - A mode-parameterized confidence gate for act/no-act decisions

pub mod classifier;
pub mod confidence;
pub mod gesture;

pub use classifier::{Classification, GestureClassifier, GestureThresholds};
pub use confidence::{ConfidenceGate, ConfidenceLevel, PredictionMode};
pub use gesture::{Alternate, GestureKind};
