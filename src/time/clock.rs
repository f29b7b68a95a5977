//! Monotonic Timebase
//!
//! Provides microsecond-precision monotonic timestamps anchored to a
//! process-wide epoch. Touch samples and frame ticks carry host-provided
//! timestamps, so all core logic stays deterministic under test; the clock
//! itself is only consulted by live drivers (CLI replay/simulate).

use std::sync::OnceLock;
use std::time::Instant;

/// Process-wide anchor, initialized once at startup
static ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Monotonic clock anchored at first use
///
/// All timestamps are expressed as microseconds since the anchor. The anchor
/// is set by `init()` (or lazily by the first `now()`), so timestamps are
/// comparable only within one process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct MonoClock;

impl MonoClock {
    /// Initialize the clock anchor. Call once at startup.
    pub fn init() {
        ANCHOR.get_or_init(Instant::now);
    }

    /// Get current time in microseconds since the anchor.
    #[inline]
    pub fn now_micros() -> u64 {
        let anchor = ANCHOR.get_or_init(Instant::now);
        anchor.elapsed().as_micros() as u64
    }

    /// Elapsed time between two microsecond values.
    /// Returns 0 if end < start.
    #[inline]
    pub fn elapsed_micros(start: u64, end: u64) -> u64 {
        end.saturating_sub(start)
    }

    /// Elapsed time in milliseconds.
    #[inline]
    pub fn elapsed_millis(start: u64, end: u64) -> u64 {
        Self::elapsed_micros(start, end) / 1_000
    }

    /// Check if two timestamp values maintain monotonicity.
    /// Returns true if t2 >= t1.
    #[inline]
    pub fn is_monotonic(t1: u64, t2: u64) -> bool {
        t2 >= t1
    }
}

/// A timestamp storing raw microseconds since the clock anchor.
/// Conversion to coarser units is deferred until needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from raw microseconds.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create a timestamp from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Capture the current timestamp.
    #[inline]
    pub fn now() -> Self {
        Self(MonoClock::now_micros())
    }

    /// Get the raw microsecond value.
    #[inline]
    pub const fn micros(&self) -> u64 {
        self.0
    }

    /// Convert to milliseconds (truncating).
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0 / 1_000
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Duration since another timestamp, saturating at zero.
    #[inline]
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }

    /// Offset this timestamp forward by a duration.
    #[inline]
    pub fn offset(&self, by: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(by.micros()))
    }

    /// Check if this timestamp is after another.
    #[inline]
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

impl serde::Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Raw microseconds for maximum precision
        serializer.serialize_u64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Timestamp(micros))
    }
}

/// A duration in raw microseconds with saturating arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(u64);

impl Duration {
    /// Create a duration from microseconds.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create a duration from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Get the raw microsecond value.
    #[inline]
    pub const fn micros(&self) -> u64 {
        self.0
    }

    /// Convert to milliseconds (truncating).
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0 / 1_000
    }

    /// Convert to milliseconds as f64.
    #[inline]
    pub fn as_millis_f64(&self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Zero duration.
    pub const ZERO: Duration = Duration(0);
}

impl std::ops::Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_sub(rhs.0))
    }
}
