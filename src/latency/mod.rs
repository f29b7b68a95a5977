//! Frame latency monitoring
//!
//! Rolling frame-time statistics and the derived latency mode that drives
//! quality adaptation.

pub mod budget;
pub mod monitor;

pub use budget::LatencyBudget;
pub use monitor::{LatencyBudgetMonitor, LatencyMode, LatencyReport, OptimizationLevel};
