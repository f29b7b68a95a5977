//! Trace recording and replay
//!
//! JSON trace format for captured touch streams, plus deterministic
//! synthetic traces for demos and tests.

pub mod trace;

pub use trace::{TouchTrace, TraceMetadata, CURRENT_FORMAT_VERSION};
