//! Touch Trace Data Structures
//!
//! Defines the serialization format for recorded touch streams, used to
//! replay real interactions through the prediction pipeline and to generate
//! deterministic synthetic traces for demos and tests.

use crate::input::types::{TouchEvent, TouchPhase, TouchSample};
use crate::time::clock::Timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current trace format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Trace metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceMetadata {
    /// Unique trace ID
    pub id: Uuid,
    /// Trace name
    pub name: String,
    /// Free-form description of the captured interaction
    pub description: Option<String>,
    /// Capture start time (wall clock)
    pub started_at: DateTime<Utc>,
    /// Capture end time
    pub ended_at: Option<DateTime<Utc>>,
    /// Total event count
    pub event_count: usize,
    /// Trace duration in milliseconds
    pub duration_ms: u64,
    /// Version of the trace format
    pub format_version: String,
}

impl TraceMetadata {
    /// Create new metadata for a trace
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            started_at: Utc::now(),
            ended_at: None,
            event_count: 0,
            duration_ms: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }

    /// Finalize the trace with end time and event count
    pub fn finalize(&mut self, event_count: usize, duration_ms: u64) {
        self.ended_at = Some(Utc::now());
        self.event_count = event_count;
        self.duration_ms = duration_ms;
    }
}

impl Default for TraceMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: None,
            started_at: Utc::now(),
            ended_at: None,
            event_count: 0,
            duration_ms: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// A complete recording of a touch interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchTrace {
    /// Trace metadata
    pub metadata: TraceMetadata,
    /// Ordered touch events
    pub events: Vec<TouchEvent>,
}

impl TouchTrace {
    /// Create a new empty trace
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            metadata: TraceMetadata::new(name, description),
            events: Vec::new(),
        }
    }

    /// Append an event to the trace
    pub fn push(&mut self, event: TouchEvent) {
        self.events.push(event);
    }

    /// Finalize the trace, deriving duration from the recorded events
    pub fn finalize(&mut self) {
        let duration_ms = match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last
                .sample
                .timestamp
                .duration_since(first.sample.timestamp)
                .as_millis(),
            _ => 0,
        };
        self.metadata.finalize(self.events.len(), duration_ms);
    }

    /// Save trace to a file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load trace from a file.
    ///
    /// Logs a warning if the trace was saved with an unknown format version,
    /// but still attempts to deserialize it (forward-compatible via
    /// `#[serde(default)]`).
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: TouchTrace = serde_json::from_str(&content)?;
        if trace.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %trace.metadata.name,
                found = %trace.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Trace has different format version; some fields may use default values"
            );
        }
        Ok(trace)
    }

    /// Get the number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the trace is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in a given phase
    pub fn events_in_phase(&self, phase: TouchPhase) -> Vec<&TouchEvent> {
        self.events.iter().filter(|e| e.phase == phase).collect()
    }

    /// Distinct touch ids appearing in the trace, in first-seen order
    pub fn touch_ids(&self) -> Vec<u64> {
        let mut ids = Vec::new();
        for event in &self.events {
            if !ids.contains(&event.sample.id) {
                ids.push(event.sample.id);
            }
        }
        ids
    }

    /// Check that timestamps never decrease within any one touch id.
    /// Returns the offending event index on violation.
    pub fn check_monotonic(&self) -> Result<(), usize> {
        let mut last_by_id = std::collections::HashMap::new();
        for (index, event) in self.events.iter().enumerate() {
            if let Some(last) = last_by_id.insert(event.sample.id, event.sample.timestamp) {
                if event.sample.timestamp < last {
                    return Err(index);
                }
            }
        }
        Ok(())
    }

    /// Deterministic synthetic tap at (x, y) starting at `start_ms`
    pub fn synthetic_tap(x: f64, y: f64, start_ms: u64) -> Self {
        let mut trace = Self::new("synthetic_tap".to_string(), None);
        trace.push(TouchEvent::start(TouchSample::new(
            1,
            x,
            y,
            Timestamp::from_millis(start_ms),
        )));
        trace.push(TouchEvent::end(TouchSample::new(
            1,
            x + 1.0,
            y,
            Timestamp::from_millis(start_ms + 70),
        )));
        trace.finalize();
        trace
    }

    /// Deterministic synthetic horizontal swipe
    pub fn synthetic_swipe(start_ms: u64) -> Self {
        let mut trace = Self::new("synthetic_swipe".to_string(), None);
        trace.push(TouchEvent::start(TouchSample::new(
            1,
            0.0,
            200.0,
            Timestamp::from_millis(start_ms),
        )));
        for step in 1..=5u64 {
            trace.push(TouchEvent::moved(TouchSample::new(
                1,
                step as f64 * 30.0,
                200.0,
                Timestamp::from_millis(start_ms + step * 30),
            )));
        }
        trace.push(TouchEvent::end(TouchSample::new(
            1,
            180.0,
            200.0,
            Timestamp::from_millis(start_ms + 180),
        )));
        trace.finalize();
        trace
    }

    /// Deterministic synthetic two-finger pinch-in
    pub fn synthetic_pinch(start_ms: u64) -> Self {
        let mut trace = Self::new("synthetic_pinch".to_string(), None);
        trace.push(TouchEvent::start(TouchSample::new(
            1,
            50.0,
            200.0,
            Timestamp::from_millis(start_ms),
        )));
        trace.push(TouchEvent::start(TouchSample::new(
            2,
            250.0,
            200.0,
            Timestamp::from_millis(start_ms),
        )));
        for step in 1..=4u64 {
            let t = Timestamp::from_millis(start_ms + step * 40);
            trace.push(TouchEvent::moved(TouchSample::new(
                1,
                50.0 + step as f64 * 12.5,
                200.0,
                t,
            )));
            trace.push(TouchEvent::moved(TouchSample::new(
                2,
                250.0 - step as f64 * 12.5,
                200.0,
                t,
            )));
        }
        let t_end = Timestamp::from_millis(start_ms + 200);
        trace.push(TouchEvent::end(TouchSample::new(1, 100.0, 200.0, t_end)));
        trace.push(TouchEvent::end(TouchSample::new(2, 200.0, 200.0, t_end)));
        trace.finalize();
        trace
    }
}

impl Default for TouchTrace {
    fn default() -> Self {
        Self::new("untitled".to_string(), None)
    }
}
