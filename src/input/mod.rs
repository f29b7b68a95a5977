//! Touch input module
//!
//! Normalized touch records and the lock-free queue that carries them from
//! the platform input thread into the prediction session.

pub mod queue;
pub mod types;

pub use queue::{SampleConsumer, SampleProducer, SampleQueue};
pub use types::{TouchEvent, TouchPhase, TouchSample};
