//! Quality Ladder
//!
//! One shared implementation of monotonic tier step-down, used by every
//! quality modality (rendering latency modes, audio quality tiers) instead of
//! re-deriving the stepping logic per modality. A ladder is an ordered list
//! of tiers, best first; stepping down clamps at the floor.

/// A tier in an ordered quality ladder
pub trait LadderTier: Copy + Eq + Sized + 'static {
    /// All tiers, best first
    const ORDER: &'static [Self];

    /// Position in the ladder (0 = best)
    fn rank(self) -> usize {
        Self::ORDER
            .iter()
            .position(|t| *t == self)
            .unwrap_or(Self::ORDER.len() - 1)
    }

    /// Step down `steps` tiers, clamping at the floor
    fn step_down(self, steps: usize) -> Self {
        let index = (self.rank() + steps).min(Self::ORDER.len() - 1);
        Self::ORDER[index]
    }

    /// The worst tier
    fn floor() -> Self {
        *Self::ORDER.last().expect("ladder must not be empty")
    }

    /// The best tier
    fn ceiling() -> Self {
        *Self::ORDER.first().expect("ladder must not be empty")
    }

    /// Whether this tier is at least as good as `other`
    fn at_least(self, other: Self) -> bool {
        self.rank() <= other.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tier {
        A,
        B,
        C,
    }

    impl LadderTier for Tier {
        const ORDER: &'static [Self] = &[Tier::A, Tier::B, Tier::C];
    }

    #[test]
    fn test_rank() {
        assert_eq!(Tier::A.rank(), 0);
        assert_eq!(Tier::C.rank(), 2);
    }

    #[test]
    fn test_step_down_clamps_at_floor() {
        assert_eq!(Tier::A.step_down(1), Tier::B);
        assert_eq!(Tier::A.step_down(2), Tier::C);
        assert_eq!(Tier::A.step_down(10), Tier::C);
        assert_eq!(Tier::C.step_down(1), Tier::C);
        assert_eq!(Tier::B.step_down(0), Tier::B);
    }

    #[test]
    fn test_floor_and_ceiling() {
        assert_eq!(Tier::floor(), Tier::C);
        assert_eq!(Tier::ceiling(), Tier::A);
    }

    #[test]
    fn test_at_least() {
        assert!(Tier::A.at_least(Tier::C));
        assert!(Tier::B.at_least(Tier::B));
        assert!(!Tier::C.at_least(Tier::B));
    }
}
