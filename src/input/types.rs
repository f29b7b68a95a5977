//! Core types for touch input
//!
//! Defines the normalized touch records consumed by the prediction pipeline.
//! The platform's raw pointer stream is adapted into these before anything
//! downstream sees it.

use crate::time::clock::Timestamp;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TouchPhase {
    /// Finger made contact
    Start = 0,
    /// Finger moved while in contact
    Move = 1,
    /// Finger lifted
    End = 2,
    /// Touch was taken over or aborted by the platform
    Cancel = 3,
}

impl TouchPhase {
    /// Check if this phase ends the touch's lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, TouchPhase::End | TouchPhase::Cancel)
    }

    /// Check if this phase carries a position update worth tracking
    pub fn is_tracking(&self) -> bool {
        matches!(self, TouchPhase::Start | TouchPhase::Move)
    }
}

/// One normalized touch sample
///
/// Immutable once recorded. `id` is the platform's touch identifier and is
/// stable for the lifetime of one finger contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    /// Platform touch identifier
    pub id: u64,
    /// Horizontal position in surface pixels
    pub x: f64,
    /// Vertical position in surface pixels (y grows downward)
    pub y: f64,
    /// Host-provided monotonic timestamp
    #[serde(rename = "t")]
    pub timestamp: Timestamp,
    /// Contact pressure in [0, 1], when the platform reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl TouchSample {
    /// Create a sample without pressure data
    pub fn new(id: u64, x: f64, y: f64, timestamp: Timestamp) -> Self {
        Self {
            id,
            x,
            y,
            timestamp,
            pressure: None,
        }
    }

    /// Attach a pressure reading
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Straight-line distance to another sample
    pub fn distance_to(&self, other: &TouchSample) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A touch sample tagged with its lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Lifecycle phase
    pub phase: TouchPhase,
    /// The sample payload
    pub sample: TouchSample,
}

impl TouchEvent {
    /// Create a touch-start event
    pub fn start(sample: TouchSample) -> Self {
        Self {
            phase: TouchPhase::Start,
            sample,
        }
    }

    /// Create a touch-move event
    pub fn moved(sample: TouchSample) -> Self {
        Self {
            phase: TouchPhase::Move,
            sample,
        }
    }

    /// Create a touch-end event
    pub fn end(sample: TouchSample) -> Self {
        Self {
            phase: TouchPhase::End,
            sample,
        }
    }

    /// Create a touch-cancel event
    pub fn cancel(sample: TouchSample) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            sample,
        }
    }
}
