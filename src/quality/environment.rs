//! Environment Telemetry Snapshot
//!
//! Already-computed device/network/battery summaries polled from the host.
//! Absent telemetry is treated as its most favorable value so the system
//! degrades toward higher quality in the absence of data; that bias is
//! deliberate and load-bearing.

use serde::{Deserialize, Serialize};

/// Battery level at or below which battery is considered critical
const CRITICAL_BATTERY_LEVEL: f64 = 0.15;

/// RTT above which an otherwise-good connection is considered fair, ms
const FAIR_RTT_MS: f64 = 300.0;

/// RTT above which an otherwise-excellent connection is considered good, ms
const GOOD_RTT_MS: f64 = 150.0;

/// Coarse device capability class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTier {
    #[default]
    High,
    Medium,
    Low,
    Critical,
}

/// Effective bandwidth class as reported by the host's network stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandwidthClass {
    #[serde(rename = "slow-2g")]
    Slow2G,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
}

/// Derived connection quality class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    Offline,
}

impl ConnectionQuality {
    /// Derive connection quality from a snapshot.
    ///
    /// Pure function of its inputs at read time. Missing RTT or bandwidth
    /// resolves toward the more favorable class.
    pub fn from_snapshot(env: &EnvSnapshot) -> Self {
        if !env.is_online {
            return ConnectionQuality::Offline;
        }
        match env.bandwidth {
            Some(BandwidthClass::Slow2G) | Some(BandwidthClass::TwoG) => {
                return ConnectionQuality::Poor
            }
            Some(BandwidthClass::ThreeG) => return ConnectionQuality::Fair,
            Some(BandwidthClass::FourG) | None => {}
        }
        match env.rtt_ms {
            Some(rtt) if rtt > FAIR_RTT_MS => ConnectionQuality::Fair,
            Some(rtt) if rtt > GOOD_RTT_MS => ConnectionQuality::Good,
            _ => ConnectionQuality::Excellent,
        }
    }
}

/// Polled snapshot of device, network, and battery conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSnapshot {
    /// Device capability class
    pub device_tier: DeviceTier,
    /// Whether this is a mobile device
    pub is_mobile: bool,
    /// Network reachability
    pub is_online: bool,
    /// Round-trip time, ms, if measured
    pub rtt_ms: Option<f64>,
    /// Effective bandwidth class, if reported
    pub bandwidth: Option<BandwidthClass>,
    /// Whether the user enabled data-saver
    pub save_data: bool,
    /// Battery charge in [0, 1], if the platform reports it
    pub battery_level: Option<f64>,
    /// Platform's own low-battery flag, if reported
    pub is_low_battery: Option<bool>,
    /// Memory pressure in [0, 1], if reported
    pub memory_pressure: Option<f64>,
}

impl Default for EnvSnapshot {
    fn default() -> Self {
        // Most favorable assumptions throughout
        Self {
            device_tier: DeviceTier::High,
            is_mobile: false,
            is_online: true,
            rtt_ms: None,
            bandwidth: None,
            save_data: false,
            battery_level: None,
            is_low_battery: None,
            memory_pressure: None,
        }
    }
}

impl EnvSnapshot {
    /// Whether battery conditions warrant degrading quality.
    ///
    /// Absent battery telemetry means not critical.
    pub fn battery_is_critical(&self) -> bool {
        if self.is_low_battery == Some(true) {
            return true;
        }
        matches!(self.battery_level, Some(level) if level <= CRITICAL_BATTERY_LEVEL)
    }
}
