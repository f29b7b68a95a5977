//! Confidence Gating
//!
//! Maps raw classification probabilities to qualitative confidence levels and
//! act/no-act decisions, parameterized by an operating mode that shifts the
//! thresholds without changing the underlying algorithm.

use serde::{Deserialize, Serialize};

/// Coarse qualitative bucket derived from a continuous probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl ConfidenceLevel {
    /// Bucket a probability: ≥0.8 high, ≥0.6 medium, ≥0.3 low, else none.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.8 {
            ConfidenceLevel::High
        } else if probability >= 0.6 {
            ConfidenceLevel::Medium
        } else if probability >= 0.3 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::None
        }
    }
}

/// Operating mode for gesture action-taking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// Act only on near-certain predictions
    Conservative,
    /// Default tradeoff
    #[default]
    Balanced,
    /// Act early, accepting more false positives
    Aggressive,
}

impl PredictionMode {
    /// Probability at or above which a prediction triggers an action
    pub fn act_threshold(&self) -> f64 {
        match self {
            PredictionMode::Conservative => 0.9,
            PredictionMode::Balanced => 0.75,
            PredictionMode::Aggressive => 0.6,
        }
    }

    /// Probability below which a prediction is not surfaced at all
    /// (kept only as an internal alternate)
    pub fn surface_threshold(&self) -> f64 {
        match self {
            PredictionMode::Conservative => 0.8,
            PredictionMode::Balanced => 0.6,
            PredictionMode::Aggressive => 0.4,
        }
    }
}

impl std::fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PredictionMode::Conservative => "conservative",
            PredictionMode::Balanced => "balanced",
            PredictionMode::Aggressive => "aggressive",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for PredictionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(PredictionMode::Conservative),
            "balanced" => Ok(PredictionMode::Balanced),
            "aggressive" => Ok(PredictionMode::Aggressive),
            other => Err(format!("unknown prediction mode: {other}")),
        }
    }
}

/// Confidence gate parameterized by an operating mode
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceGate {
    /// Active operating mode
    pub mode: PredictionMode,
    /// Explicit action threshold, overriding the mode's when set
    act_override: Option<f64>,
}

impl ConfidenceGate {
    /// Create a gate for the given mode
    pub fn new(mode: PredictionMode) -> Self {
        Self {
            mode,
            act_override: None,
        }
    }

    /// Replace the mode's action threshold with an explicit value
    pub fn with_act_threshold(mut self, threshold: f64) -> Self {
        self.act_override = Some(threshold);
        self
    }

    /// Qualitative level for a probability
    pub fn level(&self, probability: f64) -> ConfidenceLevel {
        ConfidenceLevel::from_probability(probability)
    }

    /// Whether the probability clears the action threshold
    pub fn should_act(&self, probability: f64) -> bool {
        probability >= self.act_override.unwrap_or_else(|| self.mode.act_threshold())
    }

    /// Whether the probability is high enough to surface as a prediction
    pub fn should_surface(&self, probability: f64) -> bool {
        probability >= self.mode.surface_threshold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_buckets() {
        assert_eq!(ConfidenceLevel::from_probability(0.95), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_probability(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_probability(0.79), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_probability(0.6), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_probability(0.59), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_probability(0.3), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_probability(0.29), ConfidenceLevel::None);
        assert_eq!(ConfidenceLevel::from_probability(0.0), ConfidenceLevel::None);
    }

    #[test]
    fn test_act_thresholds_per_mode() {
        let conservative = ConfidenceGate::new(PredictionMode::Conservative);
        let balanced = ConfidenceGate::new(PredictionMode::Balanced);
        let aggressive = ConfidenceGate::new(PredictionMode::Aggressive);

        assert!(!conservative.should_act(0.85));
        assert!(conservative.should_act(0.9));

        assert!(!balanced.should_act(0.7));
        assert!(balanced.should_act(0.75));

        assert!(!aggressive.should_act(0.55));
        assert!(aggressive.should_act(0.6));
    }

    #[test]
    fn test_surface_thresholds_per_mode() {
        let conservative = ConfidenceGate::new(PredictionMode::Conservative);
        let balanced = ConfidenceGate::new(PredictionMode::Balanced);
        let aggressive = ConfidenceGate::new(PredictionMode::Aggressive);

        assert!(!conservative.should_surface(0.7));
        assert!(conservative.should_surface(0.8));

        assert!(!balanced.should_surface(0.5));
        assert!(balanced.should_surface(0.6));

        assert!(!aggressive.should_surface(0.3));
        assert!(aggressive.should_surface(0.4));
    }

    #[test]
    fn test_mode_roundtrip_parse() {
        for mode in [
            PredictionMode::Conservative,
            PredictionMode::Balanced,
            PredictionMode::Aggressive,
        ] {
            let parsed: PredictionMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert!("reckless".parse::<PredictionMode>().is_err());
    }

    #[test]
    fn test_default_mode_is_balanced() {
        assert_eq!(PredictionMode::default(), PredictionMode::Balanced);
        assert_eq!(ConfidenceGate::default().mode, PredictionMode::Balanced);
    }

    #[test]
    fn test_explicit_act_threshold_overrides_mode() {
        let gate = ConfidenceGate::new(PredictionMode::Conservative).with_act_threshold(0.5);
        assert!(gate.should_act(0.5));
        assert!(!gate.should_act(0.49));

        // Surfacing still follows the mode
        assert!(!gate.should_surface(0.7));
    }
}
