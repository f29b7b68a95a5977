//! Latency Budget Monitoring
//!
//! Samples frame-to-frame timing into a bounded ring buffer, detects dropped
//! frames, and periodically derives an optimization level and a latency mode
//! from the achieved-vs-target ratio. A manual mode override bypasses the
//! periodic recomputation entirely until cleared.

use super::budget::LatencyBudget;
use crate::quality::ladder::LadderTier;
use crate::time::clock::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Ring buffer capacity for frame deltas
const FRAME_WINDOW: usize = 60;

/// Minimum samples before a 95th percentile is reported
const P95_MIN_SAMPLES: usize = 10;

/// Ticks between mode recomputations
const RECOMPUTE_INTERVAL: u64 = 30;

/// How hard the renderer should shed work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    #[default]
    None,
    Moderate,
    Aggressive,
    Extreme,
}

/// Latency operating profile for the rendering pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LatencyMode {
    /// Plenty of headroom, no interaction pressure
    #[default]
    Normal,
    /// Mild pressure or active interaction
    Low,
    /// Sustained pressure
    UltraLow,
    /// Budget blown; minimum-latency rendering
    Instant,
}

impl LadderTier for LatencyMode {
    const ORDER: &'static [Self] = &[
        LatencyMode::Normal,
        LatencyMode::Low,
        LatencyMode::UltraLow,
        LatencyMode::Instant,
    ];
}

/// On-demand latency metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    /// Latest frame delta, ms
    pub current_ms: f64,
    /// Mean of the retained window, ms
    pub average_ms: f64,
    /// 95th percentile, once enough samples exist
    pub p95_ms: Option<f64>,
    /// Frames whose delta exceeded twice the target
    pub dropped_frames: u64,
    /// Current latency mode
    pub mode: LatencyMode,
    /// Current optimization level
    pub optimization: OptimizationLevel,
}

/// Frame timing monitor deriving optimization level and latency mode
pub struct LatencyBudgetMonitor {
    target_ms: f64,
    deltas: VecDeque<f64>,
    last_tick: Option<Timestamp>,
    tick_count: u64,
    dropped_frames: u64,
    interaction_active: bool,
    optimization: OptimizationLevel,
    mode: LatencyMode,
    override_mode: Option<LatencyMode>,
}

impl LatencyBudgetMonitor {
    /// Create a monitor for a target frame time in milliseconds
    pub fn new(target_ms: f64) -> Self {
        Self {
            target_ms: if target_ms > 0.0 { target_ms } else { 1_000.0 / 60.0 },
            deltas: VecDeque::with_capacity(FRAME_WINDOW),
            last_tick: None,
            tick_count: 0,
            dropped_frames: 0,
            interaction_active: false,
            optimization: OptimizationLevel::None,
            mode: LatencyMode::Normal,
            override_mode: None,
        }
    }

    /// Create a monitor targeting a frame rate
    pub fn for_fps(fps: u32) -> Self {
        Self::new(1_000.0 / fps.max(1) as f64)
    }

    /// Record one rendering tick.
    ///
    /// The first tick only anchors the clock; every later tick contributes a
    /// frame delta. Every 30 ticks the optimization level and latency mode
    /// are recomputed from the window average, unless an override is active.
    pub fn record_frame(&mut self, now: Timestamp) {
        let Some(last) = self.last_tick.replace(now) else {
            return;
        };
        let delta_ms = now.duration_since(last).as_millis_f64();

        self.deltas.push_back(delta_ms);
        while self.deltas.len() > FRAME_WINDOW {
            self.deltas.pop_front();
        }

        if delta_ms > 2.0 * self.target_ms {
            self.dropped_frames += 1;
        }

        self.tick_count += 1;
        if self.tick_count % RECOMPUTE_INTERVAL == 0 {
            self.recompute();
        }
    }

    /// Mark whether a user interaction is in progress; active interaction
    /// disallows the `Normal` mode during recomputation.
    pub fn set_interaction_active(&mut self, active: bool) {
        self.interaction_active = active;
    }

    /// Force a latency mode, bypassing recomputation until cleared with None
    pub fn set_override(&mut self, mode: Option<LatencyMode>) {
        self.override_mode = mode;
        if let Some(forced) = mode {
            self.mode = forced;
        }
    }

    /// Latest frame delta, ms
    pub fn current_ms(&self) -> f64 {
        self.deltas.back().copied().unwrap_or(0.0)
    }

    /// Mean frame delta over the window, ms
    pub fn average_ms(&self) -> f64 {
        if self.deltas.is_empty() {
            return 0.0;
        }
        self.deltas.iter().sum::<f64>() / self.deltas.len() as f64
    }

    /// 95th percentile frame delta, once at least 10 samples exist
    pub fn p95_ms(&self) -> Option<f64> {
        if self.deltas.len() < P95_MIN_SAMPLES {
            return None;
        }
        let mut sorted: Vec<f64> = self.deltas.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let index = ((sorted.len() as f64 * 0.95).ceil() as usize).saturating_sub(1);
        Some(sorted[index])
    }

    /// Frames that exceeded twice the target
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    /// Current latency mode (override takes precedence)
    pub fn mode(&self) -> LatencyMode {
        self.override_mode.unwrap_or(self.mode)
    }

    /// Current optimization level
    pub fn optimization_level(&self) -> OptimizationLevel {
        self.optimization
    }

    /// Static budget allocation for the current target
    pub fn budget(&self) -> LatencyBudget {
        LatencyBudget::for_target(self.target_ms)
    }

    /// Full metrics snapshot
    pub fn report(&self) -> LatencyReport {
        LatencyReport {
            current_ms: self.current_ms(),
            average_ms: self.average_ms(),
            p95_ms: self.p95_ms(),
            dropped_frames: self.dropped_frames,
            mode: self.mode(),
            optimization: self.optimization,
        }
    }

    fn recompute(&mut self) {
        if self.override_mode.is_some() {
            return;
        }
        let ratio = self.average_ms() / self.target_ms;

        self.optimization = if ratio < 0.8 {
            OptimizationLevel::None
        } else if ratio < 1.0 {
            OptimizationLevel::Moderate
        } else if ratio < 1.5 {
            OptimizationLevel::Aggressive
        } else {
            OptimizationLevel::Extreme
        };

        let mode = if ratio < 0.5 && !self.interaction_active {
            LatencyMode::Normal
        } else if ratio < 0.8 {
            LatencyMode::Low
        } else if ratio < 1.2 {
            LatencyMode::UltraLow
        } else {
            LatencyMode::Instant
        };

        if mode != self.mode {
            debug!(?mode, ratio, "latency mode changed");
            self.mode = mode;
        }
    }
}
