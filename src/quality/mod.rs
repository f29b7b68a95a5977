//! Adaptive quality control
//!
//! Maps the derived latency mode and environment telemetry to concrete
//! rendering and audio quality profiles, with deterministic downgrade rules
//! on one shared quality ladder and explicit manual overrides.

pub mod audio;
pub mod environment;
pub mod ladder;
pub mod render;

pub use audio::{AudioQuality, AudioQualityController, AudioQualityTier};
pub use environment::{BandwidthClass, ConnectionQuality, DeviceTier, EnvSnapshot};
pub use ladder::LadderTier;
pub use render::{RenderQuality, RenderQualityController, TextureQuality};

use parking_lot::RwLock;
use std::sync::Arc;

/// Shared environment snapshot, refreshed by a telemetry poller and read by
/// quality controllers.
pub type SharedEnv = Arc<RwLock<EnvSnapshot>>;

/// Create a shared snapshot seeded with favorable defaults
pub fn shared_env() -> SharedEnv {
    Arc::new(RwLock::new(EnvSnapshot::default()))
}
