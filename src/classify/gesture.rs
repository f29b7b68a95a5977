//! Gesture vocabulary

use serde::{Deserialize, Serialize};

/// Discrete gesture categories the classifier can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    Tap,
    DoubleTap,
    LongPress,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    Drag,
    PinchIn,
    PinchOut,
    RotateCw,
    RotateCcw,
}

impl GestureKind {
    /// Stable kebab-case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::Tap => "tap",
            GestureKind::DoubleTap => "double-tap",
            GestureKind::LongPress => "long-press",
            GestureKind::SwipeLeft => "swipe-left",
            GestureKind::SwipeRight => "swipe-right",
            GestureKind::SwipeUp => "swipe-up",
            GestureKind::SwipeDown => "swipe-down",
            GestureKind::Drag => "drag",
            GestureKind::PinchIn => "pinch-in",
            GestureKind::PinchOut => "pinch-out",
            GestureKind::RotateCw => "rotate-cw",
            GestureKind::RotateCcw => "rotate-ccw",
        }
    }

    /// Check if this is a swipe in any direction
    pub fn is_swipe(&self) -> bool {
        matches!(
            self,
            GestureKind::SwipeLeft
                | GestureKind::SwipeRight
                | GestureKind::SwipeUp
                | GestureKind::SwipeDown
        )
    }

    /// Check if this is a tap or double-tap
    pub fn is_tap_family(&self) -> bool {
        matches!(self, GestureKind::Tap | GestureKind::DoubleTap)
    }

    /// Check if this gesture requires two fingers
    pub fn is_two_finger(&self) -> bool {
        matches!(
            self,
            GestureKind::PinchIn
                | GestureKind::PinchOut
                | GestureKind::RotateCw
                | GestureKind::RotateCcw
        )
    }

    /// Swipe direction bucket for a heading in radians.
    ///
    /// `|angle| < π/4` is right, `|angle| > 3π/4` is left, otherwise down for
    /// positive angles (y grows downward) and up for negative.
    pub fn swipe_for_angle(angle: f64) -> GestureKind {
        let abs = angle.abs();
        if abs < std::f64::consts::FRAC_PI_4 {
            GestureKind::SwipeRight
        } else if abs > 3.0 * std::f64::consts::FRAC_PI_4 {
            GestureKind::SwipeLeft
        } else if angle > 0.0 {
            GestureKind::SwipeDown
        } else {
            GestureKind::SwipeUp
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lower-probability runner-up carried alongside a classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alternate {
    /// The runner-up gesture
    pub gesture: GestureKind,
    /// Its raw probability
    pub probability: f64,
}
