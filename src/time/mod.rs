//! Monotonic timing module
//!
//! This module provides microsecond-precision timing that is:
//! - Monotonic (never goes backward)
//! - Deterministic under test (host-provided timestamps flow through unchanged)
//! - Zero-overhead in the hot path

pub mod clock;

pub use clock::{Duration, MonoClock, Timestamp};
