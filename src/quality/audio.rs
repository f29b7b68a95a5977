//! Audio Quality Control
//!
//! Composes device tier, connection quality, data-saver, battery, and buffer
//! health into one audio quality tier, applying an ordered sequence of
//! downgrade rules on the shared quality ladder. A forced tier bypasses the
//! whole computation until cleared back to automatic.

use super::environment::{ConnectionQuality, DeviceTier, EnvSnapshot};
use super::ladder::LadderTier;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Buffer underruns beyond which quality is stepped down (automatic mode)
const UNDERRUN_DOWNGRADE_THRESHOLD: u64 = 5;

/// Audio quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioQualityTier {
    High,
    Medium,
    Low,
    UltraLow,
}

impl LadderTier for AudioQualityTier {
    const ORDER: &'static [Self] = &[
        AudioQualityTier::High,
        AudioQualityTier::Medium,
        AudioQualityTier::Low,
        AudioQualityTier::UltraLow,
    ];
}

impl std::fmt::Display for AudioQualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AudioQualityTier::High => "high",
            AudioQualityTier::Medium => "medium",
            AudioQualityTier::Low => "low",
            AudioQualityTier::UltraLow => "ultra-low",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for AudioQualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(AudioQualityTier::High),
            "medium" => Ok(AudioQualityTier::Medium),
            "low" => Ok(AudioQualityTier::Low),
            "ultra-low" => Ok(AudioQualityTier::UltraLow),
            other => Err(format!("unknown audio quality tier: {other}")),
        }
    }
}

/// Concrete audio pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioQuality {
    /// Sample rate, Hz
    pub sample_rate: u32,
    /// Bit depth
    pub bit_depth: u32,
    /// Channel count
    pub channels: u32,
    /// Jitter buffer length, ms
    pub buffer_ms: u32,
    /// Codec compression level (0 = none)
    pub compression_level: u32,
    /// FFT window for analysis
    pub fft_size: u32,
    /// Voice activity detection
    pub vad: bool,
    /// Echo cancellation
    pub echo_cancellation: bool,
    /// Noise suppression
    pub noise_suppression: bool,
    /// Automatic gain control
    pub agc: bool,
}

impl AudioQuality {
    /// The static settings for a tier; fully determined, never partial
    pub fn for_tier(tier: AudioQualityTier) -> Self {
        match tier {
            AudioQualityTier::High => Self {
                sample_rate: 48_000,
                bit_depth: 24,
                channels: 2,
                buffer_ms: 100,
                compression_level: 0,
                fft_size: 2048,
                vad: true,
                echo_cancellation: true,
                noise_suppression: true,
                agc: true,
            },
            AudioQualityTier::Medium => Self {
                sample_rate: 44_100,
                bit_depth: 16,
                channels: 2,
                buffer_ms: 150,
                compression_level: 3,
                fft_size: 1024,
                vad: true,
                echo_cancellation: true,
                noise_suppression: true,
                agc: false,
            },
            AudioQualityTier::Low => Self {
                sample_rate: 22_050,
                bit_depth: 16,
                channels: 1,
                buffer_ms: 250,
                compression_level: 6,
                fft_size: 512,
                vad: true,
                echo_cancellation: false,
                noise_suppression: false,
                agc: false,
            },
            AudioQualityTier::UltraLow => Self {
                sample_rate: 16_000,
                bit_depth: 16,
                channels: 1,
                buffer_ms: 400,
                compression_level: 9,
                fft_size: 256,
                vad: false,
                echo_cancellation: false,
                noise_suppression: false,
                agc: false,
            },
        }
    }
}

/// Audio quality controller with deterministic downgrade composition
#[derive(Debug, Clone, Default)]
pub struct AudioQualityController {
    forced: Option<AudioQualityTier>,
    underrun_count: u64,
}

impl AudioQualityController {
    /// Create a controller in automatic mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a tier, bypassing automatic computation; None returns to auto
    pub fn set_forced(&mut self, tier: Option<AudioQualityTier>) {
        self.forced = tier;
    }

    /// Whether a manual override is active
    pub fn is_forced(&self) -> bool {
        self.forced.is_some()
    }

    /// Record one playback buffer underrun
    pub fn record_underrun(&mut self) {
        self.underrun_count += 1;
    }

    /// Underruns recorded since the last reset
    pub fn underruns(&self) -> u64 {
        self.underrun_count
    }

    /// Clear the underrun counter (after a buffer resize, typically)
    pub fn reset_underruns(&mut self) {
        self.underrun_count = 0;
    }

    /// Derive the active tier for the given environment.
    ///
    /// Order is fixed: forced override → device-tier base → offline
    /// short-circuit → connection downgrade (poor: 2 steps, fair: 1) →
    /// data-saver → critical battery → buffer underruns. Every step-down
    /// clamps at ultra-low.
    pub fn tier_for(&self, env: &EnvSnapshot) -> AudioQualityTier {
        if let Some(forced) = self.forced {
            return forced;
        }

        let base = match (env.device_tier, env.is_mobile) {
            (DeviceTier::High, true) => AudioQualityTier::Medium,
            (DeviceTier::High, false) => AudioQualityTier::High,
            (DeviceTier::Medium, _) => AudioQualityTier::Medium,
            (DeviceTier::Low, _) | (DeviceTier::Critical, _) => AudioQualityTier::Low,
        };

        let connection = ConnectionQuality::from_snapshot(env);
        if connection == ConnectionQuality::Offline {
            return AudioQualityTier::UltraLow;
        }

        let mut tier = base;
        match connection {
            ConnectionQuality::Poor => tier = tier.step_down(2),
            ConnectionQuality::Fair => tier = tier.step_down(1),
            _ => {}
        }
        if env.save_data {
            tier = tier.step_down(1);
        }
        if env.battery_is_critical() {
            tier = tier.step_down(1);
        }
        if self.underrun_count > UNDERRUN_DOWNGRADE_THRESHOLD {
            debug!(underruns = self.underrun_count, "underrun downgrade applied");
            tier = tier.step_down(1);
        }
        tier
    }

    /// Full settings for the active tier
    pub fn settings(&self, env: &EnvSnapshot) -> AudioQuality {
        AudioQuality::for_tier(self.tier_for(env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::environment::BandwidthClass;

    fn desktop_high() -> EnvSnapshot {
        EnvSnapshot::default()
    }

    #[test]
    fn test_base_tier_from_device() {
        let controller = AudioQualityController::new();

        assert_eq!(controller.tier_for(&desktop_high()), AudioQualityTier::High);

        let mobile_high = EnvSnapshot {
            is_mobile: true,
            ..Default::default()
        };
        assert_eq!(controller.tier_for(&mobile_high), AudioQualityTier::Medium);

        let medium = EnvSnapshot {
            device_tier: DeviceTier::Medium,
            ..Default::default()
        };
        assert_eq!(controller.tier_for(&medium), AudioQualityTier::Medium);

        for tier in [DeviceTier::Low, DeviceTier::Critical] {
            let env = EnvSnapshot {
                device_tier: tier,
                ..Default::default()
            };
            assert_eq!(controller.tier_for(&env), AudioQualityTier::Low);
        }
    }

    #[test]
    fn test_offline_forces_ultra_low_regardless_of_tier() {
        let controller = AudioQualityController::new();
        for tier in [
            DeviceTier::High,
            DeviceTier::Medium,
            DeviceTier::Low,
            DeviceTier::Critical,
        ] {
            let env = EnvSnapshot {
                device_tier: tier,
                is_online: false,
                ..Default::default()
            };
            assert_eq!(controller.tier_for(&env), AudioQualityTier::UltraLow);
        }
    }

    #[test]
    fn test_poor_connection_drops_two_steps() {
        let controller = AudioQualityController::new();

        // high → low
        let env = EnvSnapshot {
            bandwidth: Some(BandwidthClass::TwoG),
            ..Default::default()
        };
        assert_eq!(controller.tier_for(&env), AudioQualityTier::Low);

        // medium → ultra-low
        let env = EnvSnapshot {
            device_tier: DeviceTier::Medium,
            bandwidth: Some(BandwidthClass::TwoG),
            ..Default::default()
        };
        assert_eq!(controller.tier_for(&env), AudioQualityTier::UltraLow);

        // low → ultra-low (clamped)
        let env = EnvSnapshot {
            device_tier: DeviceTier::Low,
            bandwidth: Some(BandwidthClass::Slow2G),
            ..Default::default()
        };
        assert_eq!(controller.tier_for(&env), AudioQualityTier::UltraLow);
    }

    #[test]
    fn test_fair_connection_drops_one_step() {
        let controller = AudioQualityController::new();
        let env = EnvSnapshot {
            bandwidth: Some(BandwidthClass::ThreeG),
            ..Default::default()
        };
        assert_eq!(controller.tier_for(&env), AudioQualityTier::Medium);
    }

    #[test]
    fn test_downgrades_compose_in_order() {
        let controller = AudioQualityController::new();
        // Fair connection + data-saver + critical battery: high → ultra-low
        let env = EnvSnapshot {
            bandwidth: Some(BandwidthClass::ThreeG),
            save_data: true,
            battery_level: Some(0.05),
            ..Default::default()
        };
        assert_eq!(controller.tier_for(&env), AudioQualityTier::UltraLow);
    }

    #[test]
    fn test_underruns_strictly_decrease_tier() {
        let mut controller = AudioQualityController::new();
        let env = desktop_high();
        let baseline = controller.tier_for(&env);

        for _ in 0..=UNDERRUN_DOWNGRADE_THRESHOLD {
            controller.record_underrun();
        }
        let degraded = controller.tier_for(&env);
        assert!(degraded.rank() > baseline.rank());

        controller.reset_underruns();
        assert_eq!(controller.tier_for(&env), baseline);
    }

    #[test]
    fn test_underruns_at_threshold_do_not_downgrade() {
        let mut controller = AudioQualityController::new();
        for _ in 0..UNDERRUN_DOWNGRADE_THRESHOLD {
            controller.record_underrun();
        }
        assert_eq!(
            controller.tier_for(&desktop_high()),
            AudioQualityTier::High
        );
    }

    #[test]
    fn test_forced_tier_bypasses_everything() {
        let mut controller = AudioQualityController::new();
        controller.set_forced(Some(AudioQualityTier::High));

        // Offline, poor battery, underruns: forced value is returned verbatim
        let hostile = EnvSnapshot {
            is_online: false,
            battery_level: Some(0.01),
            save_data: true,
            ..Default::default()
        };
        for _ in 0..20 {
            controller.record_underrun();
        }
        assert_eq!(controller.tier_for(&hostile), AudioQualityTier::High);

        // Clearing returns to automatic computation
        controller.set_forced(None);
        assert_eq!(controller.tier_for(&hostile), AudioQualityTier::UltraLow);
    }

    #[test]
    fn test_underruns_ignored_when_forced() {
        let mut controller = AudioQualityController::new();
        controller.set_forced(Some(AudioQualityTier::Medium));
        for _ in 0..20 {
            controller.record_underrun();
        }
        assert_eq!(
            controller.tier_for(&desktop_high()),
            AudioQualityTier::Medium
        );
    }

    #[test]
    fn test_settings_fully_determined_by_tier() {
        let high = AudioQuality::for_tier(AudioQualityTier::High);
        assert_eq!(high.sample_rate, 48_000);
        assert!(high.agc);

        let ultra = AudioQuality::for_tier(AudioQualityTier::UltraLow);
        assert_eq!(ultra.sample_rate, 16_000);
        assert_eq!(ultra.compression_level, 9);
        assert!(!ultra.vad);

        // Sample rate and FFT shrink monotonically down the ladder
        let rates: Vec<u32> = AudioQualityTier::ORDER
            .iter()
            .map(|t| AudioQuality::for_tier(*t).sample_rate)
            .collect();
        assert!(rates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_tier_parse_roundtrip() {
        for tier in AudioQualityTier::ORDER {
            let parsed: AudioQualityTier = tier.to_string().parse().unwrap();
            assert_eq!(parsed, *tier);
        }
        assert!("lossless".parse::<AudioQualityTier>().is_err());
    }
}
