//! Rendering Quality Profiles
//!
//! Static per-latency-mode table of rendering settings. The profile is always
//! fully determined by the mode (or a forced override); nothing is ever
//! partially stale.

use super::ladder::LadderTier;
use crate::latency::monitor::LatencyMode;
use serde::{Deserialize, Serialize};

/// Texture detail class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureQuality {
    High,
    Medium,
    Low,
    Minimal,
}

impl LadderTier for TextureQuality {
    const ORDER: &'static [Self] = &[
        TextureQuality::High,
        TextureQuality::Medium,
        TextureQuality::Low,
        TextureQuality::Minimal,
    ];
}

/// Concrete rendering settings for the avatar surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderQuality {
    /// Target frame rate
    pub fps: u32,
    /// Texture detail
    pub texture_quality: TextureQuality,
    /// Particle effects enabled
    pub particles: bool,
    /// Blur passes enabled
    pub blur: bool,
    /// Shadow rendering enabled
    pub shadows: bool,
    /// Maximum simultaneous blend shapes
    pub max_blend_shapes: u32,
}

impl RenderQuality {
    /// The static profile for a latency mode
    pub fn for_mode(mode: LatencyMode) -> Self {
        match mode {
            LatencyMode::Normal => Self {
                fps: 60,
                texture_quality: TextureQuality::High,
                particles: true,
                blur: true,
                shadows: true,
                max_blend_shapes: 52,
            },
            LatencyMode::Low => Self {
                fps: 45,
                texture_quality: TextureQuality::Medium,
                particles: true,
                blur: false,
                shadows: true,
                max_blend_shapes: 32,
            },
            LatencyMode::UltraLow => Self {
                fps: 30,
                texture_quality: TextureQuality::Low,
                particles: false,
                blur: false,
                shadows: false,
                max_blend_shapes: 16,
            },
            LatencyMode::Instant => Self {
                fps: 24,
                texture_quality: TextureQuality::Minimal,
                particles: false,
                blur: false,
                shadows: false,
                max_blend_shapes: 8,
            },
        }
    }
}

/// Render-side quality controller with an explicit manual override
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderQualityController {
    forced_mode: Option<LatencyMode>,
}

impl RenderQualityController {
    /// Create a controller in automatic mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a mode; None returns to automatic
    pub fn set_forced(&mut self, mode: Option<LatencyMode>) {
        self.forced_mode = mode;
    }

    /// Whether a manual override is active
    pub fn is_forced(&self) -> bool {
        self.forced_mode.is_some()
    }

    /// The profile for the given derived mode, honoring any override
    pub fn profile(&self, derived_mode: LatencyMode) -> RenderQuality {
        RenderQuality::for_mode(self.forced_mode.unwrap_or(derived_mode))
    }
}
