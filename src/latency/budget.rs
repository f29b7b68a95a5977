//! Frame Latency Budget
//!
//! Static per-frame time allocation, consumed for reporting. The adaptive
//! output of the subsystem is the derived mode and quality profile, not this
//! table.

use serde::{Deserialize, Serialize};

/// Fraction of the frame reserved for input processing
const INPUT_SHARE: f64 = 0.15;
/// Fraction of the frame reserved for animation updates
const ANIMATION_SHARE: f64 = 0.25;
/// Fraction of the frame reserved for rendering
const RENDER_SHARE: f64 = 0.45;

/// Static allocation of one frame's time budget, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyBudget {
    /// Total frame budget
    pub total_ms: f64,
    /// Share for input processing
    pub input_processing_ms: f64,
    /// Share for animation updates
    pub animation_update_ms: f64,
    /// Share for rendering
    pub render_ms: f64,
    /// Unallocated headroom
    pub remaining_ms: f64,
}

impl LatencyBudget {
    /// Allocate a budget for the given total frame time
    pub fn for_target(total_ms: f64) -> Self {
        let input_processing_ms = total_ms * INPUT_SHARE;
        let animation_update_ms = total_ms * ANIMATION_SHARE;
        let render_ms = total_ms * RENDER_SHARE;
        Self {
            total_ms,
            input_processing_ms,
            animation_update_ms,
            render_ms,
            remaining_ms: total_ms - input_processing_ms - animation_update_ms - render_ms,
        }
    }

    /// Allocate a budget for a target frame rate
    pub fn for_fps(fps: u32) -> Self {
        Self::for_target(1_000.0 / fps.max(1) as f64)
    }
}
